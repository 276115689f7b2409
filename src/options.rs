//! Configuration options for INI parsing.
//!
//! The grammar itself is fixed; options only decide how strictly the parser
//! treats lines that end before their grammar is complete, such as `[open`
//! or `key = "unclosed`.
//!
//! ## Examples
//!
//! ```rust
//! use lossless_ini::{parse_with_options, ParseOptions};
//!
//! // Permissive (default): the line is kept, but reports itself unterminated
//! let file = parse_with_options(&b"[open\n"[..], ParseOptions::new()).unwrap();
//! assert!(!file.head().unwrap().terminated());
//!
//! // Strict: the same input is rejected
//! let result = parse_with_options(&b"[open\n"[..], ParseOptions::strict());
//! assert!(result.is_err());
//! ```

use serde::{Deserialize, Serialize};

/// Configuration options for INI parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Fail with [`Error::Unterminated`](crate::Error::Unterminated) when a
    /// line ends before its grammar is complete.
    pub strict: bool,
}

impl ParseOptions {
    /// Creates default options (permissive).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lossless_ini::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert!(!options.strict);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject unterminated lines.
    #[must_use]
    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }

    /// Sets whether unterminated lines are rejected.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
