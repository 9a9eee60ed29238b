// src/data/window.rs

//! Implements the [`SlidingWindow`] of pattern-match instants.

use std::collections::VecDeque;

use crate::data::datetime::{DateTimeU, DurationU};

/// Wall-clock instant recorded when a tailed line matched the watched
/// pattern set.
pub type MatchEvent = DateTimeU;

/// A trailing time-bounded sequence of [`MatchEvent`]s, oldest first.
///
/// Entries arrive in timestamp order, so expiry only ever removes from the
/// front. After every [`record`] the window holds no entry older than the
/// `span`; during a silence with no new matches the caller must [`trim`]
/// (or inspect [`newest`]) itself, as staleness is only noticed when asked.
///
/// [`record`]: SlidingWindow::record
/// [`trim`]: SlidingWindow::trim
/// [`newest`]: SlidingWindow::newest
#[derive(Clone, Debug)]
pub struct SlidingWindow {
    /// window width
    span: DurationU,
    /// match instants, oldest first
    events: VecDeque<MatchEvent>,
}

impl SlidingWindow {
    pub fn new(span: DurationU) -> SlidingWindow {
        assert!(span > DurationU::zero(), "window span must be positive, got {}", span);

        SlidingWindow {
            span,
            events: VecDeque::new(),
        }
    }

    /// Append a match instant then expire stale entries.
    ///
    /// `now` must be at or after every instant recorded so far.
    pub fn record(&mut self, now: DateTimeU) {
        self.events.push_back(now);
        self.trim(now);
    }

    /// Remove entries with age greater than the window span, oldest first.
    ///
    /// Entries are in timestamp order so removal stops at the first
    /// young-enough entry.
    pub fn trim(&mut self, now: DateTimeU) {
        while let Some(oldest) = self.events.front() {
            if now.signed_duration_since(*oldest) > self.span {
                self.events.pop_front();
            } else {
                break;
            }
        }
    }

    /// count of match instants currently within the window
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all entries at once; the reset transition.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// The most recent match instant, if any.
    pub fn newest(&self) -> Option<MatchEvent> {
        self.events.back().copied()
    }

    /// The oldest match instant still within the window, if any.
    pub fn oldest(&self) -> Option<MatchEvent> {
        self.events.front().copied()
    }

    /// the window width
    pub fn span(&self) -> DurationU {
        self.span
    }

    /// Iterate the match instants, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }
}
