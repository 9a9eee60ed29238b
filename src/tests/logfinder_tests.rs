// src/tests/logfinder_tests.rs

#![allow(non_snake_case)]

use std::io::Write;

use ::filetime::{set_file_mtime, FileTime};
use ::test_case::test_case;

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;
use crate::readers::logfinder::{find_active_log, glob_to_regex, FindLogResult, LogFile};
use crate::tests::common::TempDir;

// -------------------------------------------------------------------------------------------------

#[test_case("output_log_*.txt", "output_log_2023-04-05_12-00-00.txt", true; "typical timestamped name")]
#[test_case("output_log_*.txt", "output_log_.txt", true; "star matches empty")]
#[test_case("output_log_*.txt", "output_log.txt", false; "missing underscore")]
#[test_case("output_log_*.txt", "xoutput_log_1.txt", false; "anchored at start")]
#[test_case("output_log_*.txt", "output_log_1.txt.bak", false; "anchored at end")]
#[test_case("*.log", "a.log", true; "plain suffix glob")]
#[test_case("*.log", "alog", false; "dot matched literally")]
#[test_case("log?.txt", "log1.txt", true; "question mark single char")]
#[test_case("log?.txt", "log12.txt", false; "question mark not a run")]
#[test_case("log(1)*.txt", "log(1)_a.txt", true; "regex metacharacters escaped")]
fn test_glob_to_regex(
    glob: &str,
    name: &str,
    matches_expect: bool,
) {
    let re = glob_to_regex(glob).unwrap();
    assert_eq!(
        matches_expect,
        re.is_match(name),
        "glob {:?} compiled to {:?}; matching {:?}",
        glob,
        re.as_str(),
        name
    );
}

// -------------------------------------------------------------------------------------------------

/// create file `name` under `tempdir` with a fixed modified time
fn touch(
    tempdir: &TempDir,
    name: &str,
    mtime_unix: i64,
) -> FPath {
    let path = tempdir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"created for testing\n").unwrap();
    file.flush().unwrap();
    drop(file);
    set_file_mtime(&path, FileTime::from_unix_time(mtime_unix, 0)).unwrap();

    path_to_fpath(&path)
}

/// helper to wrap the match and panic checks
fn find_expect_found(
    dir: &FPath,
    glob: &str,
) -> LogFile {
    let re = glob_to_regex(glob).unwrap();
    match find_active_log(dir, &re) {
        FindLogResult::Found(logfile) => logfile,
        result => {
            panic!("expected FindLogResult::Found, got {:?}", result);
        }
    }
}

#[test]
fn test_find_active_log_missing_directory() {
    let re = glob_to_regex("*.log").unwrap();
    let dir = FPath::from("/nonexistent/path/to/logs");
    match find_active_log(&dir, &re) {
        FindLogResult::DirErr(_err) => {}
        result => {
            panic!("expected FindLogResult::DirErr, got {:?}", result);
        }
    }
}

#[test]
fn test_find_active_log_empty_directory() {
    let tempdir = TempDir::new().unwrap();
    let dir = path_to_fpath(tempdir.path());
    let re = glob_to_regex("*.log").unwrap();
    match find_active_log(&dir, &re) {
        FindLogResult::NoneFound => {}
        result => {
            panic!("expected FindLogResult::NoneFound, got {:?}", result);
        }
    }
}

#[test]
fn test_find_active_log_no_matching_name() {
    let tempdir = TempDir::new().unwrap();
    touch(&tempdir, "notes.txt", 1000);
    let dir = path_to_fpath(tempdir.path());
    let re = glob_to_regex("*.log").unwrap();
    match find_active_log(&dir, &re) {
        FindLogResult::NoneFound => {}
        result => {
            panic!("expected FindLogResult::NoneFound, got {:?}", result);
        }
    }
}

#[test]
fn test_find_active_log_picks_most_recent() {
    let tempdir = TempDir::new().unwrap();
    touch(&tempdir, "output_log_old.txt", 1000);
    let path_new = touch(&tempdir, "output_log_aaa.txt", 2000);
    touch(&tempdir, "output_log_mid.txt", 1500);
    let dir = path_to_fpath(tempdir.path());
    let logfile = find_expect_found(&dir, "output_log_*.txt");
    assert_eq!(path_new, logfile.path);
    assert_eq!("output_log_aaa.txt", logfile.name);
}

#[test]
fn test_find_active_log_mtime_tie_lexicographic() {
    let tempdir = TempDir::new().unwrap();
    touch(&tempdir, "output_log_a.txt", 1000);
    let path_b = touch(&tempdir, "output_log_b.txt", 1000);
    let dir = path_to_fpath(tempdir.path());
    // identical modified times; the lexicographically greatest name wins
    let logfile = find_expect_found(&dir, "output_log_*.txt");
    assert_eq!(path_b, logfile.path);
}

#[test]
fn test_find_active_log_ignores_nonmatching_newer() {
    let tempdir = TempDir::new().unwrap();
    let path_match = touch(&tempdir, "output_log_1.txt", 1000);
    touch(&tempdir, "crash_dump.txt", 9000);
    let dir = path_to_fpath(tempdir.path());
    let logfile = find_expect_found(&dir, "output_log_*.txt");
    assert_eq!(path_match, logfile.path);
}

#[test]
fn test_find_active_log_ignores_subdirectories() {
    let tempdir = TempDir::new().unwrap();
    // a directory whose name matches the glob must not be chosen
    std::fs::create_dir(tempdir.path().join("output_log_dir.txt")).unwrap();
    let path_match = touch(&tempdir, "output_log_1.txt", 1000);
    let dir = path_to_fpath(tempdir.path());
    let logfile = find_expect_found(&dir, "output_log_*.txt");
    assert_eq!(path_match, logfile.path);
}
