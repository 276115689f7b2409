//! Error types for INI parsing and serialization.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: A byte that is illegal in its position, with the
//!   zero-based line and column of that byte
//! - **Unterminated Lines**: Only in strict mode, see [`ParseOptions`](crate::ParseOptions)
//! - **I/O Errors**: Failures of the underlying byte source or sink, passed
//!   through unchanged
//!
//! All errors are fatal. The parser stops at the first one and returns no
//! partial file.
//!
//! ## Examples
//!
//! ```rust
//! use lossless_ini::{from_slice, Error, SyntaxErrorKind};
//!
//! let err = from_slice(b"[a]\nk=\"v\"x\n").unwrap_err();
//! assert!(matches!(
//!     err,
//!     Error::Syntax { kind: SyntaxErrorKind::CharAfterQuotedValue, line: 1, col: 5, .. }
//! ));
//! assert_eq!(
//!     err.to_string(),
//!     "illegal character after terminated quoted value 'x' (line:1, col:5)"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Represents all possible errors that can occur while parsing or serializing.
#[derive(Debug, Error)]
pub enum Error {
    /// A byte that may not appear where it was found
    #[error("{} {} (line:{line}, col:{col})", .kind.message(), EscapedByte(.byte))]
    Syntax {
        kind: SyntaxErrorKind,
        byte: u8,
        line: usize,
        col: usize,
    },

    /// A line ended before its grammar was complete
    #[error("unterminated line (line:{line}, col:{col})")]
    Unterminated { line: usize, col: usize },

    /// The byte source or sink failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates a syntax error for `byte` at a zero-based position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lossless_ini::{Error, SyntaxErrorKind};
    ///
    /// let err = Error::syntax(SyntaxErrorKind::IllegalValueChar, 0x00, 42, 80);
    /// assert!(err.to_string().ends_with("(line:42, col:80)"));
    /// ```
    pub fn syntax(kind: SyntaxErrorKind, byte: u8, line: usize, col: usize) -> Self {
        Error::Syntax {
            kind,
            byte,
            line,
            col,
        }
    }

    /// Creates an error for a line that ended in an unfinished state.
    pub fn unterminated(line: usize, col: usize) -> Self {
        Error::Unterminated { line, col }
    }

    /// The zero-based `(line, column)` of the error, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. } | Error::Unterminated { line, col } => {
                Some((*line, *col))
            }
            Error::Io(_) => None,
        }
    }
}

/// The specific rule a [`Error::Syntax`] violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxErrorKind {
    /// Byte that can neither pad, comment, open a section nor start a key
    InvalidEmptyLineChar,
    /// Byte that may not appear in a key
    InvalidKeyChar,
    /// Non-whitespace between a key and its `=`
    InvalidKeyPadChar,
    /// `#` or `;` inside `[...]`
    CommentInHeader,
    /// Non-whitespace, non-comment byte after `]`
    CharAfterHeader,
    /// Quote where the value state machine does not allow one
    IllegalQuote,
    /// Non-whitespace, non-comment byte after a closed quoted value
    CharAfterQuotedValue,
    /// Byte that can never appear in a value
    IllegalValueChar,
}

impl SyntaxErrorKind {
    /// Human-readable message for this error kind.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidEmptyLineChar => "invalid character for empty line",
            Self::InvalidKeyChar => "invalid character in key",
            Self::InvalidKeyPadChar => "invalid non-whitespace character in key",
            Self::CommentInHeader => "illegal comment start in bracket",
            Self::CharAfterHeader => "illegal non-comment character after closed section header",
            Self::IllegalQuote => "illegal quote character in value",
            Self::CharAfterQuotedValue => "illegal character after terminated quoted value",
            Self::IllegalValueChar => "illegal character in value",
        }
    }

    /// The grammar context the violation happened in.
    #[must_use]
    pub fn category(self) -> ErrorCategory {
        match self {
            Self::InvalidEmptyLineChar => ErrorCategory::EmptyLine,
            Self::InvalidKeyChar | Self::InvalidKeyPadChar => ErrorCategory::Key,
            Self::CommentInHeader => ErrorCategory::Header,
            Self::CharAfterHeader => ErrorCategory::PostHeader,
            Self::IllegalQuote | Self::CharAfterQuotedValue | Self::IllegalValueChar => {
                ErrorCategory::Value
            }
        }
    }
}

/// Coarse grouping of [`SyntaxErrorKind`]s by grammar context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    EmptyLine,
    Key,
    Header,
    PostHeader,
    Value,
}

/// Displays a byte quoted and ASCII-escaped, e.g. `'\x00'` or `'x'`.
struct EscapedByte<'a>(&'a u8);

impl fmt::Display for EscapedByte<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0.escape_ascii())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
