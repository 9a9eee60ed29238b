// src/readers/mod.rs

//! "Readers" for _lbwlib_.
//!
//! ## Overview of readers
//!
//! * A [`RateWatcher`] drives the whole watch: it asks [`find_active_log`]
//!   for the active log file, tails it with a [`TailReader`], and feeds
//!   pattern matches into its alert state machine.
//! * A `TailReader` reads only newly appended bytes from one open file and
//!   hands back complete text lines.
//! * [`find_active_log`] is stateless; it is called fresh on every
//!   resolution and on every rotation check.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`RateWatcher`]: crate::readers::ratewatcher::RateWatcher
//! [`TailReader`]: crate::readers::tailreader::TailReader
//! [`find_active_log`]: crate::readers::logfinder::find_active_log
//! [`Read`]: std::io::Read

pub mod helpers;
pub mod logfinder;
pub mod ratewatcher;
pub mod tailreader;
