//! # lossless_ini
//!
//! A byte-exact, format-preserving parser and serializer for INI-style
//! configuration files.
//!
//! ## What makes it lossless?
//!
//! Ordinary INI loaders keep keys and values and throw the rest away. This
//! crate keeps *everything*: leading and trailing whitespace, comment text
//! and the symbol that opened it, quotes and escape sequences, and whether
//! the file ended with a newline. Parsing and serializing again reproduces
//! the input byte for byte.
//!
//! ## Key Features
//!
//! - **Round trip**: `to_vec(&parse(input)?) == input` for every valid input
//! - **Streaming**: the parser pulls one byte at a time from any
//!   [`std::io::Read`]; the serializer is itself a resettable `Read`
//! - **Positioned errors**: zero-based line and column of the offending byte
//! - **Bytes, not strings**: no UTF-8 requirement on keys, values or comments
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use lossless_ini::{from_slice, to_vec, Line, Node};
//!
//! let input = b"# settings\n[server]\n  host = \"example.org\" ; primary\n";
//! let file = from_slice(input).unwrap();
//!
//! for line in &file {
//!     if let Line::KeyValue(kv) = line {
//!         assert_eq!(kv.key.content(), b"host");
//!         assert_eq!(kv.value.as_ref().unwrap().content(), b"example.org");
//!     }
//! }
//!
//! assert_eq!(to_vec(&file), input);
//! ```
//!
//! ## Grammar
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `[name]` | section header |
//! | `key = value` | key/value pair; the value may be `"quoted"` with `\` escapes |
//! | `#`, `;` | comment to the end of the line |
//! | space, tab, `\r` | whitespace |
//! | `\n` | line terminator |
//!
//! ## Modules
//!
//! - [`token`]: byte classification
//! - [`value`]: the value quoting state machine
//! - [`line`]: the line/node model
//! - [`de`]: the streaming parser
//! - [`ser`]: the streaming serializer
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade (line
//! completion at `trace`, parse summaries at `debug`) and never installs a
//! logger itself.

pub mod de;
pub mod error;
pub mod file;
pub mod line;
pub mod options;
pub mod ser;
pub mod token;
pub mod value;

pub use de::Parser;
pub use error::{Error, ErrorCategory, Result, SyntaxErrorKind};
pub use file::IniFile;
pub use line::{
    CommentNode, EmptyLine, HeaderNode, KeyNode, KeyValueLine, Line, Node, NodeRole,
    SectionHeaderLine, ValueNode, WhitespaceNode,
};
pub use options::ParseOptions;
pub use ser::{to_vec, to_writer, Serializer};
pub use token::{classify, tokenize, Token, TokenKind, Tokenizer};
pub use value::{value_state, ValueState};

use std::io;

/// Parses an INI file from a byte stream.
///
/// # Examples
///
/// ```rust
/// use lossless_ini::parse;
/// use std::io::Cursor;
///
/// let file = parse(Cursor::new(b"[a]\nx=1\n")).unwrap();
/// assert_eq!(file.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for the first illegal byte, or [`Error::Io`] if
/// reading from `input` fails. No partial file is returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse<R: io::Read>(input: R) -> Result<IniFile> {
    Parser::new(input).parse()
}

/// Parses an INI file from a byte stream with custom options.
///
/// # Errors
///
/// As [`parse`], plus [`Error::Unterminated`] in strict mode.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options<R: io::Read>(input: R, options: ParseOptions) -> Result<IniFile> {
    Parser::with_options(input, options).parse()
}

/// Parses an INI file from a byte slice.
///
/// # Examples
///
/// ```rust
/// use lossless_ini::from_slice;
///
/// let file = from_slice(b"").unwrap();
/// assert!(file.head().is_none());
/// assert!(file.tail().is_none());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for the first illegal byte.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(input: &[u8]) -> Result<IniFile> {
    parse(input)
}
