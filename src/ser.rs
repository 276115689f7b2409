//! INI serialization.
//!
//! This module provides the [`Serializer`], a resettable read cursor that
//! replays an [`IniFile`] back into the bytes it was parsed from.
//!
//! ## Overview
//!
//! - **Streaming**: output is produced one line at a time into the caller's
//!   buffer; reads stop early at line boundaries, so callers loop until a
//!   read returns `0`
//! - **Read-only**: the cursor borrows the file and never mutates it, so any
//!   number of cursors can replay the same file
//! - **Resettable**: [`Serializer::reset`] rewinds to the first byte
//!
//! ## Usage
//!
//! ```rust
//! use lossless_ini::{from_slice, to_vec};
//!
//! let input = b"; top\n[a] \nk = \"v\"\n";
//! let file = from_slice(input).unwrap();
//! assert_eq!(to_vec(&file), input);
//! ```
//!
//! ## Chunked Reads
//!
//! ```rust
//! use lossless_ini::from_slice;
//!
//! let file = from_slice(b"a=1\nb=2").unwrap();
//! let mut reader = file.reader();
//! let mut buf = [0u8; 3];
//! let mut out = Vec::new();
//! loop {
//!     let n = reader.read_chunk(&mut buf);
//!     if n == 0 {
//!         break;
//!     }
//!     out.extend_from_slice(&buf[..n]);
//! }
//! assert_eq!(out, b"a=1\nb=2");
//! ```

use crate::token::B_NEWLINE;
use crate::{IniFile, Result};
use std::io::{self, Write};

/// A read cursor over the serialized bytes of an [`IniFile`].
///
/// Created via [`IniFile::reader`] or [`Serializer::new`].
pub struct Serializer<'a> {
    file: &'a IniFile,
    /// Index of the next line to render
    next_line: usize,
    /// Bytes of the line being read
    buf: Vec<u8>,
    /// Read offset into `buf`
    pos: usize,
}

impl<'a> Serializer<'a> {
    pub fn new(file: &'a IniFile) -> Self {
        Serializer {
            file,
            next_line: 0,
            // Pre-allocate for a typical line
            buf: Vec::with_capacity(128),
            pos: 0,
        }
    }

    /// Fills `dst` with the next bytes of the file.
    ///
    /// Returns the number of bytes written, which is `0` only once the whole
    /// file has been read (or if `dst` is empty). A read never spans two
    /// lines. The [`io::Read`] impl wraps this in `Ok`.
    pub fn read_chunk(&mut self, dst: &mut [u8]) -> usize {
        if dst.is_empty() {
            return 0;
        }
        while self.pos == self.buf.len() {
            if !self.render_next_line() {
                return 0;
            }
        }

        let n = dst.len().min(self.buf.len() - self.pos);
        dst[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        n
    }

    /// Rewinds to the start of the file.
    pub fn reset(&mut self) {
        log::debug!("serializer reset after {} lines", self.next_line);
        self.next_line = 0;
        self.buf.clear();
        self.pos = 0;
    }

    /// Tests if every byte of the file has been read.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pos == self.buf.len() && self.next_line >= self.file.len()
    }

    /// Loads the next line and its newline into `buf`. Returns false at the
    /// end of the file.
    fn render_next_line(&mut self) -> bool {
        let Some(line) = self.file.get(self.next_line) else {
            return false;
        };
        self.buf.clear();
        self.pos = 0;
        line.write_bytes(&mut self.buf);

        self.next_line += 1;
        if self.next_line < self.file.len() || self.file.trailing_newline() {
            self.buf.push(B_NEWLINE);
        }
        true
    }
}

impl io::Read for Serializer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_chunk(buf))
    }
}

/// Serializes a file into a byte vector.
#[must_use]
pub fn to_vec(file: &IniFile) -> Vec<u8> {
    let mut out = Vec::new();
    for (index, line) in file.iter().enumerate() {
        line.write_bytes(&mut out);
        if index + 1 < file.len() || file.trailing_newline() {
            out.push(B_NEWLINE);
        }
    }
    out
}

/// Serializes a file into a writer.
///
/// # Examples
///
/// ```rust
/// use lossless_ini::{from_slice, to_writer};
///
/// let file = from_slice(b"k=v\n").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &file).unwrap();
/// assert_eq!(buffer, b"k=v\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if writing to the writer fails.
pub fn to_writer<W: Write>(mut writer: W, file: &IniFile) -> Result<()> {
    io::copy(&mut file.reader(), &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_slice;

    #[test]
    fn test_empty_file_reads_nothing() {
        let file = IniFile::default();
        let mut reader = file.reader();
        let mut buf = [0u8; 8];
        assert_eq!(reader.read_chunk(&mut buf), 0);
        assert!(reader.is_done());
    }

    #[test]
    fn test_read_stops_at_line_boundary() {
        let file = from_slice(b"ab\ncd").unwrap();
        let mut reader = file.reader();
        let mut buf = [0u8; 16];

        assert_eq!(reader.read_chunk(&mut buf), 3);
        assert_eq!(&buf[..3], b"ab\n");
        assert_eq!(reader.read_chunk(&mut buf), 2);
        assert_eq!(&buf[..2], b"cd");
        assert_eq!(reader.read_chunk(&mut buf), 0);
    }

    #[test]
    fn test_empty_destination() {
        let file = from_slice(b"a=b").unwrap();
        let mut reader = file.reader();
        assert_eq!(reader.read_chunk(&mut []), 0);
        assert!(!reader.is_done());
    }

    #[test]
    fn test_reset_mid_line() {
        let file = from_slice(b"key=value\n").unwrap();
        let mut reader = file.reader();
        let mut buf = [0u8; 4];
        assert_eq!(reader.read_chunk(&mut buf), 4);
        reader.reset();
        assert_eq!(reader.read_chunk(&mut buf), 4);
        assert_eq!(&buf, b"key=");
    }

    #[test]
    fn test_io_read_matches_read_chunk() {
        let file = from_slice(b"ab
cd").unwrap();
        let mut chunked = file.reader();
        let mut streamed = file.reader();
        let mut a = [0u8; 2];
        let mut b = [0u8; 2];
        loop {
            let n = chunked.read_chunk(&mut a);
            assert_eq!(io::Read::read(&mut streamed, &mut b).unwrap(), n);
            assert_eq!(a[..n], b[..n]);
            if n == 0 {
                break;
            }
        }
    }
}
