// common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FileOpenOptions = std::fs::OpenOptions;

/// Offset into a file in bytes
pub type FileOffset = u64;

/// A general-purpose counter
pub type Count = u64;

/// Single-byte newline char as u8
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = 10;
/// Single-byte carriage return char as u8
#[allow(non_upper_case_globals)]
pub const CRu8: u8 = 13;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Result enum for the tailing poll
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Three-state `Result` for non-blocking tail polls.
///
/// A tail never "finishes"; reaching the current end of the file is the
/// ordinary quiescent outcome, distinct from both success and failure.
#[derive(Debug)]
pub enum ResultPoll<T, E> {
    /// Contains the success data
    Found(T),
    /// Reached the current end of the file; nothing new to read, no bad
    /// errors happened
    Idle,
    /// Contains the error value, something bad happened
    Err(E),
}

impl<T, E> ResultPoll<T, E> {
    /// Returns `true` if the result is [`Found`, `Idle`].
    #[allow(dead_code)]
    #[inline(always)]
    pub const fn is_ok(&self) -> bool {
        matches!(*self, ResultPoll::Found(_) | ResultPoll::Idle)
    }

    /// Returns `true` if the result is [`Found`].
    #[inline(always)]
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultPoll::Found(_))
    }

    /// Returns `true` if the result is [`Idle`].
    #[inline(always)]
    pub const fn is_idle(&self) -> bool {
        matches!(*self, ResultPoll::Idle)
    }

    /// Returns `true` if the result is [`Err`].
    #[allow(dead_code)]
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        matches!(*self, ResultPoll::Err(_))
    }

    /// Converts from `ResultPoll<T, E>` to [`Option<T>`],
    /// consuming `self`, and discarding the error, if any.
    #[allow(dead_code)]
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultPoll::Found(x) => Some(x),
            ResultPoll::Idle => None,
            ResultPoll::Err(_) => None,
        }
    }
}

impl<T, E> std::fmt::Display for ResultPoll<T, E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultPoll::Found(_) => { write!(f, "ResultPoll::Found") },
            ResultPoll::Idle => { write!(f, "ResultPoll::Idle") },
            ResultPoll::Err(err) => { write!(f, "ResultPoll::Err({})", err) },
        }
    }
}
