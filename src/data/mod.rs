// src/data/mod.rs

//! The `data` module is the data containers used by the watcher:
//! the wall-clock types and injectable [`Clock`], and the
//! [`SlidingWindow`] of match instants that the alert logic derives from.
//!
//! ## Definitions of data
//!
//! ### MatchEvent
//!
//! A [`MatchEvent`] is the wall-clock instant at which a tailed line
//! matched the watched pattern set. It is created on match and destroyed
//! when it ages out of the window or the window is cleared.
//!
//! ### SlidingWindow
//!
//! A [`SlidingWindow`] is a trailing time-bounded sequence of
//! `MatchEvent`s, oldest first. Its size is the current match rate that
//! gates the alert trigger.
//!
//! [`Clock`]: crate::data::datetime::Clock
//! [`MatchEvent`]: crate::data::window::MatchEvent
//! [`SlidingWindow`]: crate::data::window::SlidingWindow

pub mod datetime;
pub mod window;
