// src/printer/printers.rs

//! Print user-facing status lines to the terminal with text color.

use std::io::Write;

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// color of the startup and shutdown status lines
pub const COLOR_START: Color = Color::Cyan;
/// color of the "now tailing file …" status lines
pub const COLOR_SWITCH: Color = Color::Yellow;
/// color of the alert raise status line
pub const COLOR_ALERT: Color = Color::Red;
/// color of the alert reset status line
pub const COLOR_RESET: Color = Color::Green;

/// Print colored output to terminal if possible using passed stream,
/// otherwise, print plain output.
///
/// Caller should take stream locks, e.g. `std::io::stdout().lock()`.
pub fn print_colored(
    color: Color,
    value: &[u8],
    out: &mut termcolor::StandardStream,
) -> std::io::Result<()> {
    match out.set_color(ColorSpec::new().set_fg(Some(color))) {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.set_color({:?}) returned error {}", color, err);
            return Err(err);
        }
    };
    match out.write(value) {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.write(…) returned error {}", err);
            return Err(err);
        }
    }
    match out.reset() {
        Ok(_) => {}
        Err(err) => {
            de_err!("print_colored: out.reset() returned error {}", err);
            return Err(err);
        }
    }
    out.flush()?;

    Ok(())
}

/// Print one colored status line to stdout, appending the line terminator.
///
/// Errors are printed (debug builds) then swallowed; a failed status print
/// must not stop the watch loop.
pub fn print_status(
    color: Color,
    line: &str,
) {
    let mut stdout = termcolor::StandardStream::stdout(ColorChoice::Auto);
    let _stdout_lock = std::io::stdout().lock();
    let mut value: Vec<u8> = Vec::with_capacity(line.len() + 1);
    value.extend_from_slice(line.as_bytes());
    value.push(b'\n');
    match print_colored(color, &value, &mut stdout) {
        Ok(_) => {}
        Err(_err) => {
            de_err!("print_status: print_colored(…) returned error {}", _err);
        }
    }
}

/// Safely write the `buffer` to stdout with help of [`StdoutLock`].
///
/// [`StdoutLock`]: std::io::StdoutLock
pub fn write_stdout(buffer: &[u8]) {
    let stdout = std::io::stdout();
    let mut stdout_lock = stdout.lock();
    match stdout_lock.write(buffer) {
        Ok(_) => {}
        Err(_err) => {
            // XXX: this will print when this program stdout is truncated, like due to `head`
            //          Broken pipe (os error 32)
            de_err!("stdout_lock.write(buffer@{:p} (len {})) error {}", buffer, buffer.len(), _err);
        }
    }
    match stdout_lock.flush() {
        Ok(_) => {}
        Err(_err) => {
            de_err!("stdout_lock.flush() error {}", _err);
        }
    }
}
