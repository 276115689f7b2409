//! INI parsing.
//!
//! This module provides the streaming [`Parser`] that turns a byte source into
//! an [`IniFile`].
//!
//! ## Overview
//!
//! - **Single pass, one byte at a time**: bytes are pulled through a
//!   [`Tokenizer`] and never buffered beyond the line being built
//! - **Lossless**: every byte except the line-separating newlines lands in a
//!   node, so the file serializes back to the exact input
//! - **Positioned errors**: zero-based line and column, counted in bytes
//! - **Fatal errors**: the first illegal byte aborts the parse; no partial
//!   file is returned
//!
//! ## Line state machine
//!
//! Every line starts life as an [`EmptyLine`] collecting padding. The first
//! byte that is neither whitespace nor a comment start decides, once, what the
//! line becomes:
//!
//! ```text
//! <ws>* #...            EmptyLine (comment swallows the rest)
//! <ws>* [ ...           SectionHeaderLine
//! <ws>* <key byte> ...  KeyValueLine
//! ```
//!
//! The node currently being filled is always the last optional node the line
//! has opened, so the line itself is the whole parser state.
//!
//! ## Usage
//!
//! ```rust
//! use lossless_ini::{from_slice, Line, Node};
//!
//! let file = from_slice(b"[server]\nport = 8080 ; default\n").unwrap();
//! assert_eq!(file.len(), 2);
//!
//! let Some(Line::KeyValue(line)) = file.get(1) else { panic!("expected key/value") };
//! assert_eq!(line.key.content(), b"port");
//! assert_eq!(line.value.as_ref().unwrap().raw(), b" 8080 ");
//! assert_eq!(line.comment.as_ref().unwrap().content(), b" default");
//! ```

use crate::error::SyntaxErrorKind;
use crate::line::{
    CommentNode, EmptyLine, HeaderNode, KeyNode, KeyValueLine, Line, SectionHeaderLine, ValueNode,
    WhitespaceNode,
};
use crate::token::{is_key_byte, Token, TokenKind, Tokenizer, B_NULL};
use crate::{Error, IniFile, ParseOptions, Result};
use std::io::Read;
use std::mem;

/// The streaming INI parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`]. Each parser owns its state, so independent inputs can
/// be parsed concurrently with one parser each.
pub struct Parser<R> {
    tokens: Tokenizer<R>,
    options: ParseOptions,
    file: IniFile,
    line: Line,
    line_no: usize,
    col_no: usize,
}

impl<R: Read> Parser<R> {
    pub fn new(input: R) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: R, options: ParseOptions) -> Self {
        Parser {
            tokens: Tokenizer::new(input),
            options,
            file: IniFile::default(),
            line: Line::default(),
            line_no: 0,
            col_no: 0,
        }
    }

    /// Consumes the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for the first illegal byte,
    /// [`Error::Unterminated`] for an incomplete line in strict mode, and
    /// [`Error::Io`] if the input fails.
    pub fn parse(mut self) -> Result<IniFile> {
        while let Some(token) = self.tokens.next() {
            let token = token?;

            if token.kind == TokenKind::NewLine {
                self.finish_line()?;
                self.line_no += 1;
                self.col_no = 0;
                continue;
            }

            let line = mem::take(&mut self.line);
            self.line = self.advance(line, token)?;
            self.col_no += 1;
        }

        // A final line without a newline only exists if it has content.
        if self.col_no > 0 {
            self.finish_line()?;
            self.file.set_trailing_newline(false);
        } else {
            let trailing = !self.file.is_empty();
            self.file.set_trailing_newline(trailing);
        }

        log::debug!(
            "parsed {} lines (trailing newline: {})",
            self.file.len(),
            self.file.trailing_newline()
        );
        Ok(self.file)
    }

    fn error(&self, kind: SyntaxErrorKind, byte: u8) -> Error {
        Error::syntax(kind, byte, self.line_no, self.col_no)
    }

    /// Appends the line in progress to the file and starts a fresh one.
    fn finish_line(&mut self) -> Result<()> {
        let line = mem::take(&mut self.line);
        let terminated = line.terminated();
        log::trace!(
            "line {}: {} line, terminated: {}",
            self.line_no,
            line.kind_name(),
            terminated
        );
        if self.options.strict && !terminated {
            return Err(Error::unterminated(self.line_no, self.col_no));
        }
        self.file.push(line);
        Ok(())
    }

    fn advance(&self, line: Line, token: Token) -> Result<Line> {
        match line {
            Line::Empty(line) => self.advance_empty_line(line, token),
            Line::SectionHeader(line) => self
                .advance_section_header_line(line, token)
                .map(Line::SectionHeader),
            Line::KeyValue(line) => self.advance_key_value_line(line, token).map(Line::KeyValue),
        }
    }

    /// An empty line looks like this:
    /// `<Whitespace (optional)><Comment (optional)>`
    ///
    /// It is also where every line starts, so this is where a line turns into
    /// a section header or a key/value pair.
    fn advance_empty_line(&self, mut line: EmptyLine, token: Token) -> Result<Line> {
        let byte = token.content;

        // Anything goes in a comment
        if let Some(comment) = &mut line.comment {
            comment.push(byte);
            return Ok(Line::Empty(line));
        }

        match token.kind {
            TokenKind::Whitespace => line.padding.push(byte),
            TokenKind::CommentStart => line.comment = Some(CommentNode::new(byte)),
            TokenKind::SectionStart => {
                return Ok(Line::SectionHeader(SectionHeaderLine {
                    padding: line.padding,
                    header: HeaderNode::default(),
                    post_pad: None,
                    comment: None,
                }));
            }
            _ if is_key_byte(byte) => {
                return Ok(Line::KeyValue(KeyValueLine {
                    padding: line.padding,
                    key: KeyNode::seeded(byte),
                    post_key_pad: None,
                    value: None,
                    comment: None,
                }));
            }
            _ => return Err(self.error(SyntaxErrorKind::InvalidEmptyLineChar, byte)),
        }
        Ok(Line::Empty(line))
    }

    /// A section header looks like this:
    /// `<Whitespace (optional)>[<Header>]<Whitespace (optional)><Comment (optional)>`
    fn advance_section_header_line(
        &self,
        mut line: SectionHeaderLine,
        token: Token,
    ) -> Result<SectionHeaderLine> {
        let byte = token.content;

        if let Some(comment) = &mut line.comment {
            comment.push(byte);
            return Ok(line);
        }

        if let Some(post_pad) = &mut line.post_pad {
            match token.kind {
                TokenKind::Whitespace => post_pad.push(byte),
                TokenKind::CommentStart => line.comment = Some(CommentNode::new(byte)),
                _ => return Err(self.error(SyntaxErrorKind::CharAfterHeader, byte)),
            }
            return Ok(line);
        }

        match token.kind {
            TokenKind::SectionEnd => line.post_pad = Some(WhitespaceNode::default()),
            TokenKind::CommentStart => {
                return Err(self.error(SyntaxErrorKind::CommentInHeader, byte));
            }
            _ => line.header.push(byte),
        }
        Ok(line)
    }

    /// A key/value line looks like this:
    /// `<Whitespace (optional)><Key><Whitespace (optional)>=<Value><Comment (optional)>`
    fn advance_key_value_line(
        &self,
        mut line: KeyValueLine,
        token: Token,
    ) -> Result<KeyValueLine> {
        let byte = token.content;

        if let Some(comment) = &mut line.comment {
            comment.push(byte);
            return Ok(line);
        }

        if let Some(value) = &mut line.value {
            let state = value.state();
            match token.kind {
                // Comment symbols are plain text inside quotes
                TokenKind::CommentStart if state.in_quoted_string() => value.push(byte),
                TokenKind::CommentStart => line.comment = Some(CommentNode::new(byte)),
                TokenKind::Quote if state.is_extra_quote_legal() => value.push(byte),
                TokenKind::Quote => return Err(self.error(SyntaxErrorKind::IllegalQuote, byte)),
                TokenKind::Whitespace => value.push(byte),
                _ if byte == B_NULL => {
                    return Err(self.error(SyntaxErrorKind::IllegalValueChar, byte));
                }
                _ if state.is_closed_quoted_string() => {
                    return Err(self.error(SyntaxErrorKind::CharAfterQuotedValue, byte));
                }
                _ => value.push(byte),
            }
            return Ok(line);
        }

        if let Some(post_key_pad) = &mut line.post_key_pad {
            match token.kind {
                TokenKind::Whitespace => post_key_pad.push(byte),
                TokenKind::Equals => line.value = Some(ValueNode::default()),
                _ => return Err(self.error(SyntaxErrorKind::InvalidKeyPadChar, byte)),
            }
            return Ok(line);
        }

        match token.kind {
            TokenKind::Equals => line.value = Some(ValueNode::default()),
            TokenKind::Whitespace => line.post_key_pad = Some(WhitespaceNode::seeded(byte)),
            _ if is_key_byte(byte) => line.key.push(byte),
            _ => return Err(self.error(SyntaxErrorKind::InvalidKeyChar, byte)),
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &[u8]) -> Result<IniFile> {
        Parser::new(input).parse()
    }

    #[test]
    fn test_line_type_is_decided_once() {
        let err = parse(b"  a[b]=c\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Syntax {
                kind: SyntaxErrorKind::InvalidKeyChar,
                byte: b'[',
                line: 0,
                col: 3
            }
        ));
    }

    #[test]
    fn test_position_after_newlines() {
        let err = parse(b"a=1\n\n  ]\n").unwrap_err();
        assert_eq!(err.position(), Some((2, 2)));
    }

    #[test]
    fn test_newline_never_in_nodes() {
        let file = parse(b"# c\r\n").unwrap();
        let comment = file.head().unwrap().comment().unwrap();
        assert_eq!(crate::Node::content(comment), b" c\r");
    }

    #[test]
    fn test_strict_checks_last_line() {
        let err = Parser::with_options(&b"k=v\nk"[..], ParseOptions::strict())
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::Unterminated { line: 1, col: 1 }));
    }
}
