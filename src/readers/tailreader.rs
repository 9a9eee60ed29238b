// src/readers/tailreader.rs

//! Implements the [`TailReader`], a non-blocking "read what's available
//! now" line reader positioned at the end of a file when opened.

use std::io::{Read, Seek, SeekFrom};

use ::bstr::ByteSlice;
use ::memchr::memchr;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{
    CRu8,
    Count,
    FPath,
    File,
    FileOffset,
    FileOpenOptions,
    NLu8,
    ResultPoll,
};
use crate::readers::helpers::fpath_to_path;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TailReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// read buffer size; plenty for a burst of ordinary log lines per poll
const READ_BUF_SZ: usize = 4096;

/// Returned by [`TailReader::poll_line`].
///
/// [`TailReader::poll_line`]: crate::readers::tailreader::TailReader#method.poll_line
pub type ResultPollLine = ResultPoll<String, std::io::Error>;

/// Tail one open file.
///
/// Reads only content appended after the file was opened; content present
/// at open time is never read (the cursor starts at end-of-file). A
/// partial trailing line is buffered until its newline arrives.
pub struct TailReader {
    /// path of the open file
    path: FPath,
    /// the open file
    file: File,
    /// offset of the next byte to read
    fileoffset: FileOffset,
    /// bytes read past the last complete line; grows until a newline is seen
    pending: Vec<u8>,
    /// count of bytes read
    count_bytes: Count,
    /// count of complete lines returned
    count_lines: Count,
}

impl TailReader {
    /// Open the file at `path` positioned at its current end.
    pub fn open_at_end(path: FPath) -> std::io::Result<TailReader> {
        defn!("({:?})", path);

        let mut open_options = FileOpenOptions::new();
        let mut file: File = match open_options
            .read(true)
            .open(fpath_to_path(&path))
        {
            Ok(val) => val,
            Err(err) => {
                defx!("return {:?}", err);
                return Err(err);
            }
        };
        let fileoffset: FileOffset = match file.seek(SeekFrom::End(0)) {
            Ok(val) => val,
            Err(err) => {
                defx!("return {:?}", err);
                return Err(err);
            }
        };
        defx!("opened {:?} at offset {}", path, fileoffset);

        Ok(TailReader {
            path,
            file,
            fileoffset,
            pending: Vec::new(),
            count_bytes: 0,
            count_lines: 0,
        })
    }

    /// path of the open file
    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// offset of the next byte to read
    pub fn fileoffset(&self) -> FileOffset {
        self.fileoffset
    }

    /// count of bytes read so far
    pub fn count_bytes(&self) -> Count {
        self.count_bytes
    }

    /// count of complete lines returned so far
    pub fn count_lines(&self) -> Count {
        self.count_lines
    }

    /// Return the next complete line appended since the last call, without
    /// waiting for more data.
    ///
    /// The line terminator `'\n'` is stripped, along with a preceding
    /// `'\r'` if present. Invalid UTF-8 byte sequences are replaced with
    /// U+FFFD; a malformed sequence never aborts the line read.
    pub fn poll_line(&mut self) -> ResultPollLine {
        loop {
            if let Some(at) = memchr(NLu8, &self.pending) {
                let mut line_bytes: Vec<u8> = self.pending.drain(..=at).collect();
                line_bytes.pop();
                if line_bytes.last() == Some(&CRu8) {
                    line_bytes.pop();
                }
                self.count_lines += 1;
                let line: String = line_bytes.to_str_lossy().into_owned();
                defñ!("line {} len {}", self.count_lines, line.len());
                return ResultPoll::Found(line);
            }
            let mut buf = [0u8; READ_BUF_SZ];
            match self.file.read(&mut buf) {
                Ok(0) => {
                    return ResultPoll::Idle;
                }
                Ok(sz) => {
                    self.fileoffset += sz as FileOffset;
                    self.count_bytes += sz as Count;
                    self.pending.extend_from_slice(&buf[..sz]);
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                Err(err) => {
                    defñ!("read error {:?}", err);
                    return ResultPoll::Err(err);
                }
            }
        }
    }
}
