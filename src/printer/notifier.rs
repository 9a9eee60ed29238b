// src/printer/notifier.rs

//! The desktop notification capability.

use std::io::{Error, ErrorKind};

use ::notify_rust::{Notification, Timeout};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Deliver a user-facing message outside the console.
///
/// Delivery failure is never fatal to the caller; the watch loop warns and
/// carries on, since alert delivery failure must not stop detection.
pub trait Notify: Send {
    /// Deliver `body` under `title`, displayed for `timeout_secs` seconds.
    fn notify(
        &mut self,
        title: &str,
        body: &str,
        timeout_secs: u32,
    ) -> std::io::Result<()>;
}

/// Notify by operating-system desktop notification ("toast").
pub struct DesktopNotifier;

impl Notify for DesktopNotifier {
    fn notify(
        &mut self,
        title: &str,
        body: &str,
        timeout_secs: u32,
    ) -> std::io::Result<()> {
        defñ!("({:?}, {:?}, {})", title, body, timeout_secs);
        match Notification::new()
            .summary(title)
            .body(body)
            .timeout(Timeout::Milliseconds(timeout_secs.saturating_mul(1000)))
            .show()
        {
            Ok(_) => Ok(()),
            Err(err) => Err(Error::new(ErrorKind::Other, err.to_string())),
        }
    }
}

/// A `Notify` that does nothing; backs CLI option `--no-notify`.
pub struct NoopNotifier;

impl Notify for NoopNotifier {
    fn notify(
        &mut self,
        _title: &str,
        _body: &str,
        _timeout_secs: u32,
    ) -> std::io::Result<()> {
        Ok(())
    }
}
