// src/readers/logfinder.rs

//! Find the _active_ log file: the most recently modified file in one
//! directory whose name matches a file-name glob.
//!
//! The watcher calls [`find_active_log`] fresh on every resolution and on
//! every rotation check; nothing is cached between calls.

use std::time::SystemTime;

use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::walkdir;

use crate::common::{FPath, Path};
use crate::readers::helpers::path_to_fpath;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogFinder
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One candidate log file at the moment of a resolution call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogFile {
    /// full path
    pub path: FPath,
    /// file name only
    pub name: FPath,
    /// last-modified timestamp
    pub mtime: SystemTime,
}

/// Result of one [`find_active_log`] resolution.
#[derive(Debug)]
pub enum FindLogResult {
    /// the active log file
    Found(LogFile),
    /// the directory exists but holds no matching file
    NoneFound,
    /// the directory itself is missing or unreadable; callers treat this
    /// the same as `NoneFound` (retry later), never as fatal
    DirErr(std::io::Error),
}

/// Translate a file-name glob to an anchored `Regex`: `*` matches any run
/// of characters, `?` matches any single character, everything else
/// matches literally.
pub fn glob_to_regex(glob: &str) -> std::result::Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(glob.len() * 2 + 2);
    pattern.push('^');
    let mut buf = [0u8; 4];
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    pattern.push('$');

    Regex::new(&pattern)
}

/// Return the most recently modified file directly under `dir` whose name
/// matches `name_re`, or signal why none was chosen.
///
/// Ties on the modified time are broken by the lexicographically greatest
/// file name, so repeated calls against an unchanged directory always pick
/// the same file.
///
/// Files that vanish between the directory listing and the metadata call
/// are skipped; the resolution carries on with the remaining candidates.
pub fn find_active_log(
    dir: &FPath,
    name_re: &Regex,
) -> FindLogResult {
    defn!("({:?}, {:?})", dir, name_re.as_str());

    let dir_path: &Path = Path::new(dir);
    if !dir_path.is_dir() {
        defx!("return DirErr; not a directory {:?}", dir);
        return FindLogResult::DirErr(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("log directory not found {:?}", dir),
        ));
    }

    let mut best: Option<LogFile> = None;
    for entry in walkdir::WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(val) => val,
            Err(_err) => {
                defo!("skip entry Err({:?})", _err);
                continue;
            }
        };
        if !entry
            .file_type()
            .is_file()
        {
            continue;
        }
        let name = entry
            .file_name()
            .to_string_lossy();
        if !name_re.is_match(&name) {
            defo!("skip entry, name does not match {:?}", name);
            continue;
        }
        let mtime: SystemTime = match entry
            .metadata()
            .ok()
            .and_then(|metadata| metadata.modified().ok())
        {
            Some(val) => val,
            None => {
                // listed but could not stat; likely deleted in-between
                defo!("skip entry, no modified time {:?}", entry.path());
                continue;
            }
        };
        let candidate = LogFile {
            path: path_to_fpath(entry.path()),
            name: name.to_string(),
            mtime,
        };
        best = match best {
            None => Some(candidate),
            Some(current) => {
                if (candidate.mtime, &candidate.name) > (current.mtime, &current.name) {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        };
    }

    match best {
        Some(logfile) => {
            defx!("return Found({:?})", logfile.path);

            FindLogResult::Found(logfile)
        }
        None => {
            defx!("return NoneFound");

            FindLogResult::NoneFound
        }
    }
}
