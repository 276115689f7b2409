//! The parsed file: an ordered, append-only sequence of lines.

use crate::line::Line;
use crate::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::slice;

/// A parsed INI file.
///
/// Lines are kept in source order. Every line but the last was followed by
/// a newline in the source; [`IniFile::trailing_newline`] tells whether the
/// last one was too.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IniFile {
    lines: Vec<Line>,
    trailing_newline: bool,
}

impl IniFile {
    pub(crate) fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub(crate) fn set_trailing_newline(&mut self, trailing_newline: bool) {
        self.trailing_newline = trailing_newline;
    }

    /// The first line, `None` for empty input.
    #[must_use]
    pub fn head(&self) -> Option<&Line> {
        self.lines.first()
    }

    /// The last line, `None` for empty input.
    #[must_use]
    pub fn tail(&self) -> Option<&Line> {
        self.lines.last()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Iterates from head to tail. The iterator is double-ended.
    pub fn iter(&self) -> slice::Iter<'_, Line> {
        self.lines.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the source ended with a newline after the last line.
    #[must_use]
    pub fn trailing_newline(&self) -> bool {
        self.trailing_newline
    }

    /// Tests if every line is terminated.
    #[must_use]
    pub fn terminated(&self) -> bool {
        self.lines.iter().all(Line::terminated)
    }

    /// Creates a serializer positioned at the start of the file.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lossless_ini::from_slice;
    /// use std::io::Read;
    ///
    /// let file = from_slice(b"[a]\nk = v\n").unwrap();
    /// let mut out = Vec::new();
    /// file.reader().read_to_end(&mut out).unwrap();
    /// assert_eq!(out, b"[a]\nk = v\n");
    /// ```
    #[must_use]
    pub fn reader(&self) -> Serializer<'_> {
        Serializer::new(self)
    }
}

impl<'a> IntoIterator for &'a IniFile {
    type Item = &'a Line;
    type IntoIter = slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
