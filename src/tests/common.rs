// src/tests/common.rs

//! Common helpers for tests: temporary files, a hand-advanced clock, and
//! recording/failing notifiers.

#![allow(non_snake_case)]

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use ::chrono::TimeZone;
use ::chrono::Utc;
use ::lazy_static::lazy_static;
pub use ::tempfile::{NamedTempFile, TempDir};

use crate::common::FPath;
use crate::data::datetime::{Clock, DateTimeU, DurationU};
use crate::printer::notifier::Notify;

lazy_static! {
    /// a fixed baseline instant for clock-driven tests
    pub static ref DT_BASE: DateTimeU = Utc
        .with_ymd_and_hms(2023, 4, 5, 12, 0, 0)
        .unwrap();
}

/// create a file in a temporary filesystem path with passed `data`
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = NamedTempFile::new().unwrap();
    ntf.write_all(data.as_bytes()).unwrap();
    ntf.flush().unwrap();

    ntf
}

/// small helper to get a `FPath` from a `NamedTempFile`
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_string_lossy())
}

/// append `data` to the file at `path`
pub fn append_to_file(path: &FPath, data: &[u8]) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
}

/// A `Clock` advanced by hand, shared between the test and the watcher
/// under test.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTimeU>>,
}

impl ManualClock {
    pub fn new(start: DateTimeU) -> ManualClock {
        ManualClock {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, span: DurationU) {
        self.now.set(self.now.get() + span);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(DurationU::seconds(secs));
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance(DurationU::milliseconds(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTimeU {
        self.now.get()
    }
}

/// A `Notify` that records deliveries instead of showing them.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    /// delivered `(title, body)` pairs
    pub deliveries: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> RecordingNotifier {
        RecordingNotifier::default()
    }

    /// count of deliveries so far
    pub fn count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }
}

impl Notify for RecordingNotifier {
    fn notify(
        &mut self,
        title: &str,
        body: &str,
        _timeout_secs: u32,
    ) -> std::io::Result<()> {
        self.deliveries
            .lock()
            .unwrap()
            .push((String::from(title), String::from(body)));

        Ok(())
    }
}

/// A `Notify` with a broken delivery channel.
pub struct FailingNotifier;

impl Notify for FailingNotifier {
    fn notify(
        &mut self,
        _title: &str,
        _body: &str,
        _timeout_secs: u32,
    ) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "delivery refused",
        ))
    }
}
