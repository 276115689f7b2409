//! Byte classification for the INI grammar.
//!
//! Every byte of input maps to exactly one [`TokenKind`]. The mapping is fixed:
//!
//! | Kind | Bytes |
//! |------|-------|
//! | `Whitespace` | space, tab, carriage return |
//! | `CommentStart` | `#`, `;` |
//! | `SectionStart` | `[` |
//! | `SectionEnd` | `]` |
//! | `NewLine` | `\n` |
//! | `Equals` | `=` |
//! | `Quote` | `"` |
//! | `Other` | everything else, including `\0` |
//!
//! The legality predicates in this module decide which bytes may appear in
//! which grammar position. They are pure and never allocate.
//!
//! ## Examples
//!
//! ```rust
//! use lossless_ini::{classify, TokenKind};
//!
//! assert_eq!(classify(b'['), TokenKind::SectionStart);
//! assert_eq!(classify(b'\r'), TokenKind::Whitespace);
//! assert_eq!(classify(0x00), TokenKind::Other);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};

pub const B_NULL: u8 = 0x00;
pub const B_TAB: u8 = 0x09;
pub const B_NEWLINE: u8 = 0x0A;
pub const B_CR: u8 = 0x0D;
pub const B_US: u8 = 0x1F;
pub const B_SPACE: u8 = 0x20;
pub const B_QUOTE: u8 = 0x22;
pub const B_HASH: u8 = 0x23;
pub const B_SEMICOLON: u8 = 0x3B;
pub const B_EQUALS: u8 = 0x3D;
pub const B_BRACKET: u8 = 0x5B;
pub const B_BACKSLASH: u8 = 0x5C;
pub const B_BRACKET_CLOSE: u8 = 0x5D;

/// The grammar role of a single input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Space, tab or carriage return
    Whitespace,
    /// `#` or `;`
    CommentStart,
    /// `[`
    SectionStart,
    /// `]`
    SectionEnd,
    /// `\n`
    NewLine,
    /// `=`
    Equals,
    /// `"`
    Quote,
    /// Anything else
    Other,
}

/// Classifies a raw byte. Total over all 256 values.
#[inline]
#[must_use]
pub const fn classify(byte: u8) -> TokenKind {
    match byte {
        B_NEWLINE => TokenKind::NewLine,
        B_BRACKET => TokenKind::SectionStart,
        B_BRACKET_CLOSE => TokenKind::SectionEnd,
        B_EQUALS => TokenKind::Equals,
        B_HASH | B_SEMICOLON => TokenKind::CommentStart,
        B_QUOTE => TokenKind::Quote,
        B_SPACE | B_TAB | B_CR => TokenKind::Whitespace,
        _ => TokenKind::Other,
    }
}

/// Returns true for space, tab and carriage return.
#[inline]
#[must_use]
pub const fn is_whitespace_byte(byte: u8) -> bool {
    matches!(classify(byte), TokenKind::Whitespace)
}

/// Returns true for `#` and `;`.
#[inline]
#[must_use]
pub const fn is_comment_start(byte: u8) -> bool {
    matches!(classify(byte), TokenKind::CommentStart)
}

/// Checks if the byte may be part of a key.
///
/// Keys exclude control characters, space, `=`, `[` and `]`.
#[inline]
#[must_use]
pub const fn is_key_byte(byte: u8) -> bool {
    !matches!(
        byte,
        B_NULL..=B_US | B_SPACE | B_EQUALS | B_BRACKET | B_BRACKET_CLOSE
    )
}

/// Checks if the byte may appear in a value outside of quotes.
#[inline]
#[must_use]
pub const fn is_unquoted_value_byte(byte: u8) -> bool {
    !is_comment_start(byte) && !matches!(byte, B_NULL | B_NEWLINE | B_QUOTE)
}

/// Checks if the byte may appear inside a quoted value.
///
/// Quotes and backslashes pass this check; their meaning is decided by the
/// value state machine.
#[inline]
#[must_use]
pub const fn is_quoted_value_byte(byte: u8) -> bool {
    !matches!(byte, B_NULL | B_NEWLINE)
}

/// Conservative set of bytes for a section name: no nulls, newlines,
/// brackets or comment starts.
#[inline]
#[must_use]
pub const fn is_section_byte(byte: u8) -> bool {
    !matches!(
        byte,
        B_NULL | B_NEWLINE | B_BRACKET | B_BRACKET_CLOSE | B_HASH | B_SEMICOLON
    )
}

/// Comments may hold anything except nulls and newlines.
#[inline]
#[must_use]
pub const fn is_comment_byte(byte: u8) -> bool {
    !matches!(byte, B_NULL | B_NEWLINE)
}

/// A classified input byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub content: u8,
    pub kind: TokenKind,
}

impl Token {
    #[inline]
    #[must_use]
    pub const fn new(content: u8) -> Self {
        Token {
            content,
            kind: classify(content),
        }
    }
}

/// Pulls bytes one at a time from a reader and classifies them.
///
/// Yields `Err` once if the underlying reader fails, then stops.
pub struct Tokenizer<R> {
    bytes: io::Bytes<R>,
    failed: bool,
}

impl<R: Read> Tokenizer<R> {
    pub fn new(input: R) -> Self {
        Tokenizer {
            bytes: input.bytes(),
            failed: false,
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.bytes.next()? {
            Ok(byte) => Some(Ok(Token::new(byte))),
            Err(e) => {
                self.failed = true;
                Some(Err(Error::Io(e)))
            }
        }
    }
}

/// Converts an input byte stream into a vector of tokens.
///
/// # Examples
///
/// ```rust
/// use lossless_ini::{tokenize, TokenKind};
///
/// let tokens = tokenize(&b"a=1"[..]).unwrap();
/// assert_eq!(tokens[1].kind, TokenKind::Equals);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading from `input` fails.
pub fn tokenize<R: Read>(input: R) -> Result<Vec<Token>> {
    Tokenizer::new(input).collect()
}
