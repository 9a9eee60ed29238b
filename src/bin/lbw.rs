// src/bin/lbw.rs

//! Driver program _lbw_ drives the [_lbwlib_].
//!
//! Processes user-passed command-line arguments and installs the interrupt
//! handler, then hands control to a [`RateWatcher`] which loops until
//! interrupted: find the active log file, tail newly appended lines, match
//! them against the pattern set, and raise/reset the burst alert.
//!
//! `lbw.rs` should be the only place that decides process exit.
//!
//! [_lbwlib_]: lbwlib
//! [`RateWatcher`]: lbwlib::readers::ratewatcher::RateWatcher

#![allow(non_camel_case_types)]

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ::clap::Parser;
use ::const_format::concatcp;
use ::lbwlib::common::FPath;
use ::lbwlib::data::datetime::{DurationU, WallClock};
#[allow(unused_imports)]
use ::lbwlib::debug::printers::{de_err, de_wrn, e_err, e_wrn};
use ::lbwlib::printer::notifier::{DesktopNotifier, NoopNotifier, Notify};
use ::lbwlib::printer::printers::{print_status, COLOR_START};
use ::lbwlib::printer::summary::print_summary;
use ::lbwlib::readers::helpers::path_to_fpath;
use ::lbwlib::readers::ratewatcher::{RateWatcher, WatchConfig};
use ::si_trace_print::stack::stack_offset_set;
use ::si_trace_print::{defn, defo, defx, defñ};

use ::anyhow;
use ::ctrlc;

// --------------------
// command-line parsing

/// default file-name glob; the VRChat client names its logs this way
const CLI_GLOB_DEFAULT: &str = "output_log_*.txt";

/// default log directory relative to the user profile; where the VRChat
/// client writes its logs
const CLI_DIR_SUFFIX_DEFAULT: &str = "AppData/LocalLow/VRChat/VRChat";

/// default line patterns; the two portal-error message variants
const CLI_PATTERN_DEFAULT1: &str = r"\[PortalManager\] Received portal destroy event\.";
const CLI_PATTERN_DEFAULT2: &str =
    r"\[Behaviour\] Portal can't be configured because API didn't give back the full ID\.";

const CLI_WINDOW_SECONDS_DEFAULT: u64 = 10;
const CLI_TRIGGER_COUNT_DEFAULT: usize = 5;
const CLI_CHECK_INTERVAL_DEFAULT: f32 = 0.1;
const CLI_FIND_RETRY_INTERVAL_DEFAULT: f32 = 5.0;
const CLI_NOTIFY_TIMEOUT_DEFAULT: u32 = 3;
const CLI_ALERT_TITLE_DEFAULT: &str = "log burst watcher";

const CLI_HELP_AFTER: &str = concatcp!(
    r#"DIRECTORY defaults to the VRChat client log directory under the user
profile ("#,
    CLI_DIR_SUFFIX_DEFAULT,
    r#").

PATTERN may be passed multiple times; a line is counted when any pattern
matches. Patterns are regular expressions as described at
https://docs.rs/regex/latest/regex/#syntax

An alert is raised when TRIGGER_COUNT matching lines arrive within
WINDOW_SECONDS, and reset after WINDOW_SECONDS pass with no further match.

---

Version: "#,
    env!("CARGO_PKG_VERSION"),
    r#"
License: "#,
    env!("CARGO_PKG_LICENSE"),
    r#"
Repository: "#,
    env!("CARGO_PKG_REPOSITORY"),
);

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    name = "lbw",
    version = concatcp!(
        "(log burst watcher)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Repository: ", env!("CARGO_PKG_REPOSITORY"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Directory holding the log files to watch.
    #[clap(verbatim_doc_comment)]
    directory: Option<String>,

    /// File-name glob selecting candidate log files within DIRECTORY.
    /// The most recently modified match is tailed.
    #[clap(
        short = 'g',
        long,
        verbatim_doc_comment,
        default_value_t = String::from(CLI_GLOB_DEFAULT),
    )]
    glob: String,

    /// Line pattern (regular expression) to count.
    /// May be passed multiple times; a line is counted when any pattern
    /// matches.
    #[clap(
        short = 'p',
        long = "pattern",
        verbatim_doc_comment,
    )]
    patterns: Vec<String>,

    /// Width of the sliding match window in seconds, for both the alert
    /// trigger and the reset-after-quiet rule.
    #[clap(
        short = 'w',
        long,
        verbatim_doc_comment,
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = CLI_WINDOW_SECONDS_DEFAULT,
    )]
    window_seconds: u64,

    /// Count of matching lines within the window that raises the alert.
    #[clap(
        short = 'c',
        long,
        verbatim_doc_comment,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..),
        default_value_t = CLI_TRIGGER_COUNT_DEFAULT,
    )]
    trigger_count: usize,

    /// Poll delay in seconds while no new log data is available.
    #[clap(
        short = 'i',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_interval,
        default_value_t = CLI_CHECK_INTERVAL_DEFAULT,
    )]
    check_interval: f32,

    /// Retry delay in seconds while no log file can be found at all.
    #[clap(
        long,
        verbatim_doc_comment,
        value_parser = cli_process_interval,
        default_value_t = CLI_FIND_RETRY_INTERVAL_DEFAULT,
    )]
    find_retry_interval: f32,

    /// Title of the desktop notification raised with the alert.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value_t = String::from(CLI_ALERT_TITLE_DEFAULT),
    )]
    alert_title: String,

    /// Desktop notification display time in seconds.
    #[clap(
        long,
        verbatim_doc_comment,
        default_value_t = CLI_NOTIFY_TIMEOUT_DEFAULT,
    )]
    notify_timeout: u32,

    /// Do not deliver desktop notifications; report transitions on the
    /// console only.
    #[clap(long, verbatim_doc_comment)]
    no_notify: bool,

    /// Also deliver a desktop notification when the alert resets.
    /// By default only the raise transition notifies; the reset is
    /// reported on the console.
    #[clap(long, verbatim_doc_comment)]
    notify_on_reset: bool,

    /// Print a summary of watch activity at exit.
    #[clap(short = 's', long, verbatim_doc_comment)]
    summary: bool,
}

/// `clap` argument validator for the interval options.
fn cli_process_interval(interval: &str) -> std::result::Result<f32, String> {
    match interval.parse::<f32>() {
        Ok(val) if val > 0.0 && val.is_finite() => Ok(val),
        Ok(val) => Err(format!("interval must be a positive number of seconds, got {:?}", val)),
        Err(err) => Err(format!("{}", err)),
    }
}

/// Default log directory: the VRChat client log path under the user
/// profile. `USERPROFILE` is the Windows convention; `HOME` covers
/// everything else (useful with Proton prefixes).
fn default_directory() -> FPath {
    let profile: String = std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .unwrap_or_else(|_| String::from("."));

    path_to_fpath(&std::path::Path::new(&profile).join(CLI_DIR_SUFFIX_DEFAULT))
}

/// Process user-passed command-line arguments into a `WatchConfig` plus
/// the binary-level options.
fn cli_process_args() -> (WatchConfig, bool, bool) {
    defn!();

    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let dir: FPath = match args.directory {
        Some(val) => val,
        None => default_directory(),
    };
    let patterns: Vec<String> = match args.patterns.is_empty() {
        true => vec![
            String::from(CLI_PATTERN_DEFAULT1),
            String::from(CLI_PATTERN_DEFAULT2),
        ],
        false => args.patterns,
    };

    let config = WatchConfig {
        dir,
        name_glob: args.glob,
        patterns,
        window: DurationU::seconds(args.window_seconds as i64),
        trigger_count: args.trigger_count,
        check_interval: Duration::from_secs_f32(args.check_interval),
        find_retry_interval: Duration::from_secs_f32(args.find_retry_interval),
        alert_title: args.alert_title,
        notify_timeout: args.notify_timeout,
        notify_on_reset: args.notify_on_reset,
    };
    defx!("{:?}", config);

    (config, args.no_notify, args.summary)
}

// --------------------
// interrupt handling

/// Interrupt flag set by the `ctrlc` signal handler, polled by
/// `RateWatcher::run` at least once per poll cycle.
static INTERRUPT: AtomicBool = AtomicBool::new(false);

/// set a process signal handler
pub fn set_signal_handler() -> anyhow::Result<(), ctrlc::Error> {
    defn!();

    ctrlc::set_handler(move || {
        defñ!();
        INTERRUPT.store(true, Ordering::Relaxed);
    })?;

    defx!();

    Ok(())
}

// --------------------

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let (config, no_notify, cli_opt_summary) = cli_process_args();

    match set_signal_handler() {
        Ok(_) => {}
        Err(err) => {
            e_err!("ctrlc::set_handler failed {}", err);
            defx!("exitcode FAILURE");
            return ExitCode::FAILURE;
        }
    }

    let notifier: Box<dyn Notify> = match no_notify {
        true => Box::new(NoopNotifier),
        false => Box::new(DesktopNotifier),
    };

    print_status(
        COLOR_START,
        &format!(
            "watching {:?} for files matching {:?}; alert at {} matches within {} seconds",
            config.dir, config.name_glob, config.trigger_count, config.window.num_seconds(),
        ),
    );

    let mut watcher = match RateWatcher::new(config, WallClock, notifier) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            defx!("exitcode FAILURE");
            return ExitCode::FAILURE;
        }
    };

    watcher.run(&INTERRUPT);

    // an ordinary interrupt is the one intended way to stop
    print_status(COLOR_START, "interrupted; stopping");
    if cli_opt_summary {
        print_summary(watcher.summary());
    }

    defx!("exitcode SUCCESS");

    ExitCode::SUCCESS
}
