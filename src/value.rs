//! The value quoting state machine.
//!
//! A value is everything after `=` up to a comment or the end of the line.
//! It is either unquoted text, or a single quoted string surrounded by
//! optional whitespace. [`value_state`] scans the raw bytes left to right and
//! reports where the scan ended up:
//!
//! ```text
//! Whitespace ──"──▶ Quoted ──\\──▶ QuotedBackslash ──any──▶ Quoted
//!     │               │
//!   other             "──▶ QuotedTerminated (whitespace only afterwards)
//!     ▼
//! Unquoted
//! ```
//!
//! Any byte that is illegal in its position moves to [`ValueState::Error`],
//! which is absorbing. The state is a pure function of the bytes: a
//! [`ValueNode`](crate::ValueNode) advances it with [`ValueState::step`] as
//! bytes arrive, and [`value_state`] re-derives it from scratch.

use crate::token::{
    classify, is_quoted_value_byte, is_unquoted_value_byte, is_whitespace_byte, TokenKind,
    B_BACKSLASH, B_QUOTE,
};
use serde::{Deserialize, Serialize};

/// Where a left-to-right scan of a value's raw bytes ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueState {
    /// Nothing but whitespace so far (including nothing at all)
    #[default]
    Whitespace,
    /// Inside an open quoted string
    Quoted,
    /// Inside an open quoted string, directly after an escaping backslash
    QuotedBackslash,
    /// A quoted string was closed; only whitespace may follow
    QuotedTerminated,
    /// An unquoted string
    Unquoted,
    /// The value contains a byte that is illegal where it appears
    Error,
}

impl ValueState {
    /// Feeds one more byte into the machine.
    #[must_use]
    pub fn step(self, byte: u8) -> ValueState {
        match self {
            ValueState::Whitespace => match classify(byte) {
                TokenKind::Whitespace => ValueState::Whitespace,
                TokenKind::Quote => ValueState::Quoted,
                _ if is_unquoted_value_byte(byte) => ValueState::Unquoted,
                _ => ValueState::Error,
            },
            ValueState::Unquoted => {
                if is_unquoted_value_byte(byte) {
                    ValueState::Unquoted
                } else {
                    ValueState::Error
                }
            }
            ValueState::Quoted => match byte {
                B_BACKSLASH => ValueState::QuotedBackslash,
                B_QUOTE => ValueState::QuotedTerminated,
                _ if is_quoted_value_byte(byte) => ValueState::Quoted,
                _ => ValueState::Error,
            },
            ValueState::QuotedBackslash => {
                if is_quoted_value_byte(byte) {
                    ValueState::Quoted
                } else {
                    ValueState::Error
                }
            }
            ValueState::QuotedTerminated => {
                if is_whitespace_byte(byte) {
                    ValueState::QuotedTerminated
                } else {
                    ValueState::Error
                }
            }
            ValueState::Error => ValueState::Error,
        }
    }

    /// True for the states a finished value may legally end in.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(
            self,
            ValueState::Whitespace | ValueState::Unquoted | ValueState::QuotedTerminated
        )
    }

    /// Inside a quoted string that has not been closed yet.
    #[must_use]
    pub fn in_quoted_string(self) -> bool {
        matches!(self, ValueState::Quoted | ValueState::QuotedBackslash)
    }

    #[must_use]
    pub fn is_closed_quoted_string(self) -> bool {
        self == ValueState::QuotedTerminated
    }

    /// Whether one more quote byte keeps the value legal.
    ///
    /// That is the case while the value is empty or whitespace (the quote opens
    /// a string), and while a quoted string is open (the quote closes it, or is
    /// escaped by a preceding backslash).
    #[must_use]
    pub fn is_extra_quote_legal(self) -> bool {
        !matches!(
            self,
            ValueState::QuotedTerminated | ValueState::Unquoted | ValueState::Error
        )
    }
}

/// Runs the state machine over `content`.
///
/// # Examples
///
/// ```rust
/// use lossless_ini::{value_state, ValueState};
///
/// assert_eq!(value_state(b"  "), ValueState::Whitespace);
/// assert_eq!(value_state(b" \"a\\"), ValueState::QuotedBackslash);
/// assert_eq!(value_state(b"\"a\" "), ValueState::QuotedTerminated);
/// assert_eq!(value_state(b"a;"), ValueState::Error);
/// ```
#[must_use]
pub fn value_state(content: &[u8]) -> ValueState {
    let mut state = ValueState::Whitespace;
    for &byte in content {
        state = state.step(byte);
        if state == ValueState::Error {
            break;
        }
    }
    state
}

/// Returns if `content` is a quoted string that has not been closed yet.
#[must_use]
pub fn in_quoted_string(content: &[u8]) -> bool {
    value_state(content).in_quoted_string()
}

/// Returns if `content` is a quoted string that has been closed.
#[must_use]
pub fn is_closed_quoted_string(content: &[u8]) -> bool {
    value_state(content).is_closed_quoted_string()
}

/// Returns if `content` would still be legal after appending a quote.
#[must_use]
pub fn is_extra_quote_legal(content: &[u8]) -> bool {
    value_state(content).is_extra_quote_legal()
}
