// src/readers/ratewatcher.rs

//! Implements the [`RateWatcher`], the alert/reset state machine driven
//! by tailing the active log file.
//!
//! A `RateWatcher` repeatedly asks [`find_active_log`] for the active
//! file, tails it with a [`TailReader`], feeds pattern matches into a
//! [`SlidingWindow`], raises one alert per burst that reaches the trigger
//! count, and resets after a full window width of silence.
//!
//! [`find_active_log`]: crate::readers::logfinder::find_active_log
//! [`TailReader`]: crate::readers::tailreader::TailReader
//! [`SlidingWindow`]: crate::data::window::SlidingWindow

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ::regex::{Regex, RegexSet};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{FPath, ResultPoll};
use crate::data::datetime::{Clock, DateTimeU, DurationU};
use crate::data::window::SlidingWindow;
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use crate::printer::notifier::Notify;
use crate::printer::printers::{
    print_status,
    COLOR_ALERT,
    COLOR_RESET,
    COLOR_SWITCH,
};
use crate::printer::summary::Summary;
use crate::readers::logfinder::{
    find_active_log,
    glob_to_regex,
    FindLogResult,
    LogFile,
};
use crate::readers::tailreader::TailReader;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// WatchConfig, WatchState
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Configuration for one [`RateWatcher`], fixed at startup.
#[derive(Clone, Debug)]
pub struct WatchConfig {
    /// directory holding the candidate log files
    pub dir: FPath,
    /// file-name glob selecting candidate log files within `dir`
    pub name_glob: String,
    /// line patterns; a line is counted when any pattern matches
    pub patterns: Vec<String>,
    /// width of the trailing match window, for both the alert trigger and
    /// the reset-after-quiet rule
    pub window: DurationU,
    /// count of matches within the window that raises the alert
    pub trigger_count: usize,
    /// idle poll delay, and the cadence of the rotation check
    pub check_interval: Duration,
    /// retry delay while no log file exists at all; a distinct, coarser
    /// cadence than the per-line poll
    pub find_retry_interval: Duration,
    /// title of the notification raised with the alert
    pub alert_title: String,
    /// notification display time in seconds
    pub notify_timeout: u32,
    /// also deliver a notification on the reset transition
    pub notify_on_reset: bool,
}

/// Watcher position in the two-level file-selection/tailing state machine.
pub enum WatchState {
    /// no active file; looking for one
    Searching,
    /// tailing the active file
    Tailing(TailReader),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RateWatcher
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The tailing rate detector.
///
/// Owns the [`SlidingWindow`], the `alert_sent` flag, and the tailing
/// state; all are mutated only by the single control loop in [`run`]
/// (or, in tests, by direct calls to [`observe_line`]/[`observe_idle`]).
///
/// The alert fires exactly once per rising edge: when the window reaches
/// `trigger_count` entries while quiescent. It resets after a full window
/// width of silence measured from the _last_ match, not from the raise.
/// An active-file switch never touches the accumulated window or flag.
///
/// [`run`]: RateWatcher::run
/// [`observe_line`]: RateWatcher::observe_line
/// [`observe_idle`]: RateWatcher::observe_idle
pub struct RateWatcher<C: Clock> {
    config: WatchConfig,
    /// compiled `config.name_glob`
    name_re: Regex,
    /// compiled `config.patterns`, OR semantics
    pattern_set: RegexSet,
    clock: C,
    notifier: Box<dyn Notify>,
    window: SlidingWindow,
    /// true from a raise transition until the following reset transition
    alert_sent: bool,
    state: WatchState,
    summary: Summary,
}

impl<C: Clock> RateWatcher<C> {
    /// Create a new `RateWatcher`.
    ///
    /// Fails if the file-name glob or any line pattern does not compile.
    pub fn new(
        config: WatchConfig,
        clock: C,
        notifier: Box<dyn Notify>,
    ) -> std::result::Result<RateWatcher<C>, regex::Error> {
        defn!("({:?})", config);

        let name_re: Regex = glob_to_regex(&config.name_glob)?;
        let pattern_set: RegexSet = RegexSet::new(&config.patterns)?;
        let window = SlidingWindow::new(config.window);
        defx!();

        Ok(RateWatcher {
            config,
            name_re,
            pattern_set,
            clock,
            notifier,
            window,
            alert_sent: false,
            state: WatchState::Searching,
            summary: Summary::default(),
        })
    }

    /// statistics accumulated so far
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// is the alert currently raised?
    pub fn alert_sent(&self) -> bool {
        self.alert_sent
    }

    /// count of match instants currently within the window
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Feed one line read from the active file.
    ///
    /// On a pattern match, records the instant, expires stale window
    /// entries, and raises the alert on the rising edge. The reset
    /// condition is then evaluated for every line, matching or not.
    pub fn observe_line(
        &mut self,
        line: &str,
    ) {
        self.summary.count_lines += 1;
        if self.pattern_set.is_match(line) {
            let now: DateTimeU = self.clock.now();
            self.window.record(now);
            self.summary.count_matches += 1;
            defo!("match {} at {:?}; window len {}", self.summary.count_matches, now, self.window.len());
            if self.window.len() >= self.config.trigger_count && !self.alert_sent {
                self.raise_alert();
            }
        }
        self.check_reset();
    }

    /// Evaluate the reset condition with nothing new read.
    ///
    /// Called once per idle poll. Trimming only happens when a match
    /// arrives, so during a long silence this is the only mechanism that
    /// notices staleness; without it an alert raised by a burst would
    /// persist through the silence.
    pub fn observe_idle(&mut self) {
        self.check_reset();
    }

    /// The raise transition. Fires exactly once per rising edge; no repeat
    /// alerts while already raised.
    fn raise_alert(&mut self) {
        defñ!();
        self.alert_sent = true;
        self.summary.count_alerts += 1;
        let message = format!(
            "{} matching lines within the last {} seconds",
            self.window.len(),
            self.config.window.num_seconds(),
        );
        print_status(COLOR_ALERT, &format!("ALERT: {}", message));
        match self.notifier.notify(
            &self.config.alert_title,
            &message,
            self.config.notify_timeout,
        ) {
            Ok(_) => {}
            Err(err) => {
                // delivery failure must not stop detection
                e_wrn!("notification failed: {}", err);
            }
        }
    }

    /// The reset transition: a full window width of silence measured from
    /// the last match.
    ///
    /// Re-validates staleness against the clock instead of relying on
    /// trimming, which only runs when a new match arrives.
    fn check_reset(&mut self) {
        if !self.alert_sent {
            return;
        }
        let newest = match self.window.newest() {
            Some(val) => val,
            None => return,
        };
        let now: DateTimeU = self.clock.now();
        if now.signed_duration_since(newest) <= self.window.span() {
            return;
        }
        defo!("no match for longer than {}; reset", self.window.span());
        self.window.clear();
        self.alert_sent = false;
        self.summary.count_resets += 1;
        print_status(COLOR_RESET, "alert reset after quiet period");
        if self.config.notify_on_reset {
            match self.notifier.notify(
                &self.config.alert_title,
                "alert reset after quiet period",
                self.config.notify_timeout,
            ) {
                Ok(_) => {}
                Err(err) => {
                    e_wrn!("notification failed: {}", err);
                }
            }
        }
    }

    /// Open `logfile` positioned at its end and make it the tailing
    /// target. Content written before the switch is never read. The
    /// accumulated window and alert flag are deliberately untouched.
    fn start_tailing(
        &mut self,
        logfile: LogFile,
    ) {
        defn!("({:?})", logfile.path);
        match TailReader::open_at_end(logfile.path.clone()) {
            Ok(reader) => {
                self.summary.count_files += 1;
                print_status(
                    COLOR_SWITCH,
                    &format!("tailing {} from offset {}", logfile.name, reader.fileoffset()),
                );
                self.state = WatchState::Tailing(reader);
            }
            Err(err) => {
                // vanished between resolution and open; reselect
                e_wrn!("cannot open {:?}: {}", logfile.path, err);
                self.state = WatchState::Searching;
            }
        }
        defx!();
    }

    /// Run the watch until `interrupt` becomes true.
    ///
    /// The only exit is the interrupt; every other condition keeps the
    /// loop alive. `interrupt` is checked at least once per poll cycle,
    /// and the coarse no-file retry sleep is sliced so shutdown stays
    /// prompt there too.
    pub fn run(
        &mut self,
        interrupt: &AtomicBool,
    ) {
        defn!();
        while !interrupt.load(Ordering::Relaxed) {
            match std::mem::replace(&mut self.state, WatchState::Searching) {
                WatchState::Searching => {
                    match find_active_log(&self.config.dir, &self.name_re) {
                        FindLogResult::Found(logfile) => {
                            self.start_tailing(logfile);
                        }
                        FindLogResult::NoneFound => {
                            e_wrn!(
                                "no file matching {:?} found in {:?}; retrying",
                                self.config.name_glob,
                                self.config.dir,
                            );
                            sleep_interruptible(
                                self.config.find_retry_interval,
                                self.config.check_interval,
                                interrupt,
                            );
                        }
                        FindLogResult::DirErr(err) => {
                            // same handling as no file found: wait, retry
                            e_wrn!("log directory unavailable: {}; retrying", err);
                            sleep_interruptible(
                                self.config.find_retry_interval,
                                self.config.check_interval,
                                interrupt,
                            );
                        }
                    }
                }
                WatchState::Tailing(mut reader) => {
                    match reader.poll_line() {
                        ResultPoll::Found(line) => {
                            self.observe_line(&line);
                            self.state = WatchState::Tailing(reader);
                        }
                        ResultPoll::Idle => {
                            self.observe_idle();
                            std::thread::sleep(self.config.check_interval);
                            // the active file may have rotated while idle
                            match find_active_log(&self.config.dir, &self.name_re) {
                                FindLogResult::Found(logfile) if &logfile.path != reader.path() => {
                                    defo!("active file changed {:?} -> {:?}", reader.path(), logfile.path);
                                    self.start_tailing(logfile);
                                }
                                _ => {
                                    self.state = WatchState::Tailing(reader);
                                }
                            }
                        }
                        ResultPoll::Err(err) => {
                            // deleted or rotated mid-read; treat the same
                            // as an active-file change and reselect
                            e_wrn!("read error on {:?}: {}; reselecting log file", reader.path(), err);
                        }
                    }
                }
            }
        }
        defx!();
    }
}

/// Sleep `total` in `slice`-sized naps, returning early once `interrupt`
/// becomes true.
fn sleep_interruptible(
    total: Duration,
    slice: Duration,
    interrupt: &AtomicBool,
) {
    let slice: Duration = match slice.is_zero() {
        true => total,
        false => slice,
    };
    let mut remaining: Duration = total;
    while !interrupt.load(Ordering::Relaxed) && !remaining.is_zero() {
        let nap: Duration = std::cmp::min(remaining, slice);
        std::thread::sleep(nap);
        remaining -= nap;
    }
}
