// src/data/datetime.rs

//! Wall-clock time types and the injectable [`Clock`] capability.

use ::chrono::{DateTime, Utc};

/// A wall-clock instant, always in the UTC timezone.
pub type DateTimeU = DateTime<Utc>;

/// Span of wall-clock time between two [`DateTimeU`].
pub type DurationU = ::chrono::Duration;

/// Source of the current wall-clock instant.
///
/// The watcher asks a `Clock` for _now_ instead of calling [`Utc::now`]
/// directly, so tests can drive window expiry deterministically without
/// real sleeps.
pub trait Clock {
    /// the current wall-clock instant
    fn now(&self) -> DateTimeU;
}

/// The system wall-clock; the `Clock` used outside of tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> DateTimeU {
        Utc::now()
    }
}
