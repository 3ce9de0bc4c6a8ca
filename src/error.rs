//! Error management
//!
//! Every outcome a callback can report is one of the variants of [`ErrorKind`].
//! `Success` and `Incomplete` are informational: they are never themselves
//! constructed as an error, but naming them here keeps the taxonomy total, and
//! matches the way the rest of the crate switches on "what happened" as a
//! single enum. Only [`ParseError`][ErrorKind::ParseError] and
//! [`MemoryError`][ErrorKind::MemoryError] are ever attached to a message and
//! surfaced through [`Status`].

use std::fmt;

/// The taxonomy of outcomes a callback (or the driver) can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Informational: the parse finished. Never constructed as an error.
    Success,
    /// Informational: the parse is suspended, waiting for more bytes.
    Incomplete,
    /// The input violates the grammar the current callback implements.
    ParseError,
    /// An allocation failed while buffering input.
    MemoryError,
    /// Used internally by [`fold`][crate::repeat::fold] to distinguish a wrapped
    /// callback's parse error from a parse error in its own driver logic. This
    /// variant must never escape the combinator that introduces it.
    #[doc(hidden)]
    InnerParseError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Success => "success",
            ErrorKind::Incomplete => "incomplete",
            ErrorKind::ParseError => "parse error",
            ErrorKind::MemoryError => "memory error",
            ErrorKind::InnerParseError => "inner parse error",
        };
        f.write_str(s)
    }
}

/// The status returned from [`Driver::activate`][crate::parser::Driver::activate],
/// [`Driver::submit`][crate::parser::Driver::submit], and
/// [`Driver::eof`][crate::parser::Driver::eof].
///
/// Unlike [`ErrorKind`], this type only ever carries the outcomes a caller can
/// observe at the driver boundary: `InnerParseError` is caught by `fold` before
/// it can reach here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The parse completed; the result is available via
    /// [`Driver::result`][crate::parser::Driver::result].
    Success,
    /// The parse is suspended; feed it more bytes with
    /// [`Driver::submit`][crate::parser::Driver::submit].
    Incomplete,
    /// The input violated the grammar some callback implements.
    ParseError(String),
    /// An allocation failed while buffering input.
    MemoryError(String),
}

impl Status {
    pub(crate) fn from_error(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::MemoryError => Status::MemoryError(message),
            ErrorKind::ParseError | ErrorKind::InnerParseError => Status::ParseError(message),
            ErrorKind::Success | ErrorKind::Incomplete => {
                // A callback must never resolve to an error carrying one of the
                // informational kinds; treat it as the parse error it almost
                // certainly is rather than panicking on malformed combinator code.
                Status::ParseError(message)
            }
        }
    }

    /// `true` if the parse finished successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    /// `true` if the parse is suspended, waiting for more bytes.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Status::Incomplete)
    }

    /// `true` if the parse ended in either kind of error.
    pub fn is_error(&self) -> bool {
        matches!(self, Status::ParseError(_) | Status::MemoryError(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("parse succeeded"),
            Status::Incomplete => f.write_str("parse is incomplete, more bytes needed"),
            Status::ParseError(msg) => write!(f, "parse error: {msg}"),
            Status::MemoryError(msg) => write!(f, "memory error: {msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Status {}
