//! The line and node model of a parsed INI file.
//!
//! A file is a sequence of [`Line`]s. Each line is one of three variants,
//! each composed of typed nodes that keep the exact bytes they were parsed
//! from:
//!
//! ```text
//! EmptyLine          <padding><comment?>
//! SectionHeaderLine  <padding>[<header>]<post_pad?><comment?>
//! KeyValueLine       <padding><key><post_key_pad?>=<value?><comment?>
//! ```
//!
//! Node content never includes the structural delimiters around it (the
//! brackets, the `=`, the comment symbol). Those are written back from the
//! fixed syntax by [`Line::write_bytes`], which together with the stored
//! nodes reproduces the source line exactly.

use crate::token::{B_BRACKET, B_BRACKET_CLOSE, B_EQUALS, B_QUOTE};
use crate::value::{value_state, ValueState};
use serde::{Deserialize, Serialize};

/// The grammar role of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeRole {
    Whitespace,
    Comment,
    Header,
    Key,
    Value,
}

/// A span of raw source bytes with a grammar role.
pub trait Node {
    fn role(&self) -> NodeRole;

    /// The node's bytes, without any structural delimiters.
    fn content(&self) -> &[u8];
}

/// Leading padding, padding after `]`, or padding between a key and `=`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitespaceNode {
    content: Vec<u8>,
}

impl WhitespaceNode {
    pub(crate) fn seeded(byte: u8) -> Self {
        WhitespaceNode {
            content: vec![byte],
        }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.content.push(byte);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl Node for WhitespaceNode {
    fn role(&self) -> NodeRole {
        NodeRole::Whitespace
    }

    fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A comment running to the end of the line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    /// `#` or `;`
    symbol: u8,
    /// Everything after the symbol
    content: Vec<u8>,
}

impl CommentNode {
    pub(crate) fn new(symbol: u8) -> Self {
        CommentNode {
            symbol,
            content: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.content.push(byte);
    }

    /// The symbol that opened the comment.
    #[must_use]
    pub fn symbol(&self) -> u8 {
        self.symbol
    }
}

impl Node for CommentNode {
    fn role(&self) -> NodeRole {
        NodeRole::Comment
    }

    fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A section name, without its brackets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderNode {
    content: Vec<u8>,
}

impl HeaderNode {
    pub(crate) fn push(&mut self, byte: u8) {
        self.content.push(byte);
    }
}

impl Node for HeaderNode {
    fn role(&self) -> NodeRole {
        NodeRole::Header
    }

    fn content(&self) -> &[u8] {
        &self.content
    }
}

/// The key of a key/value line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNode {
    content: Vec<u8>,
}

impl KeyNode {
    pub(crate) fn seeded(byte: u8) -> Self {
        KeyNode {
            content: vec![byte],
        }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.content.push(byte);
    }
}

impl Node for KeyNode {
    fn role(&self) -> NodeRole {
        NodeRole::Key
    }

    fn content(&self) -> &[u8] {
        &self.content
    }
}

/// Everything between `=` and a comment or the end of the line.
///
/// The raw bytes are kept verbatim, including whitespace around the value
/// and the quotes and escapes of a quoted value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawValue")]
pub struct ValueNode {
    raw: Vec<u8>,
    /// Kept in step with `raw` by `push`
    #[serde(skip_serializing)]
    state: ValueState,
}

/// The serialized form of a [`ValueNode`]; the state is re-derived on load.
#[derive(Deserialize)]
struct RawValue {
    raw: Vec<u8>,
}

impl From<RawValue> for ValueNode {
    fn from(value: RawValue) -> Self {
        ValueNode::from_raw(value.raw)
    }
}

impl ValueNode {
    pub(crate) fn from_raw(raw: Vec<u8>) -> Self {
        let state = value_state(&raw);
        ValueNode { raw, state }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        self.raw.push(byte);
        self.state = self.state.step(byte);
    }

    /// All bytes after `=`, exactly as they appeared in the source.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The value state machine's verdict on the raw bytes.
    #[must_use]
    pub fn state(&self) -> ValueState {
        self.state
    }

    /// Returns true if the value opens with a quote.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.state.in_quoted_string() || self.state.is_closed_quoted_string()
    }
}

impl Node for ValueNode {
    fn role(&self) -> NodeRole {
        NodeRole::Value
    }

    /// For a quoted value, the bytes between the quotes with escapes left
    /// as written. Otherwise the raw bytes.
    fn content(&self) -> &[u8] {
        if !self.is_quoted() {
            return &self.raw;
        }
        let Some(open) = self.raw.iter().position(|&b| b == B_QUOTE) else {
            return &self.raw;
        };
        let inner = &self.raw[open + 1..];
        if !self.state.is_closed_quoted_string() {
            return inner;
        }
        // Only whitespace may follow the closing quote.
        match inner.iter().rposition(|&b| b == B_QUOTE) {
            Some(close) => &inner[..close],
            None => inner,
        }
    }
}

/// A blank or comment-only line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyLine {
    pub padding: WhitespaceNode,
    pub comment: Option<CommentNode>,
}

/// A `[section]` line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeaderLine {
    pub padding: WhitespaceNode,
    pub header: HeaderNode,
    /// Present if and only if the closing bracket was seen
    pub post_pad: Option<WhitespaceNode>,
    pub comment: Option<CommentNode>,
}

/// A `key = value` line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueLine {
    pub padding: WhitespaceNode,
    pub key: KeyNode,
    pub post_key_pad: Option<WhitespaceNode>,
    /// Present if and only if `=` was seen
    pub value: Option<ValueNode>,
    pub comment: Option<CommentNode>,
}

/// One line of an INI file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Line {
    Empty(EmptyLine),
    SectionHeader(SectionHeaderLine),
    KeyValue(KeyValueLine),
}

impl Default for Line {
    fn default() -> Self {
        Line::Empty(EmptyLine::default())
    }
}

impl Line {
    /// Tests if the line's grammar was structurally completed.
    ///
    /// Empty lines always are. A section header is once its `]` was seen.
    /// A key/value line is once `=` was seen and the value ended as
    /// whitespace, an unquoted string, or a closed quoted string.
    #[must_use]
    pub fn terminated(&self) -> bool {
        match self {
            Line::Empty(_) => true,
            Line::SectionHeader(line) => line.post_pad.is_some(),
            Line::KeyValue(line) => line
                .value
                .as_ref()
                .is_some_and(|value| value.state().is_final()),
        }
    }

    #[must_use]
    pub fn padding(&self) -> &WhitespaceNode {
        match self {
            Line::Empty(line) => &line.padding,
            Line::SectionHeader(line) => &line.padding,
            Line::KeyValue(line) => &line.padding,
        }
    }

    #[must_use]
    pub fn comment(&self) -> Option<&CommentNode> {
        match self {
            Line::Empty(line) => line.comment.as_ref(),
            Line::SectionHeader(line) => line.comment.as_ref(),
            Line::KeyValue(line) => line.comment.as_ref(),
        }
    }

    #[must_use]
    pub fn as_empty(&self) -> Option<&EmptyLine> {
        match self {
            Line::Empty(line) => Some(line),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_section_header(&self) -> Option<&SectionHeaderLine> {
        match self {
            Line::SectionHeader(line) => Some(line),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_key_value(&self) -> Option<&KeyValueLine> {
        match self {
            Line::KeyValue(line) => Some(line),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Line::Empty(_) => "empty",
            Line::SectionHeader(_) => "section header",
            Line::KeyValue(_) => "key/value",
        }
    }

    /// Appends the line's source bytes, without its newline, to `out`.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.padding().content());
        match self {
            Line::Empty(_) => {}
            Line::SectionHeader(line) => {
                out.push(B_BRACKET);
                out.extend_from_slice(line.header.content());
                if let Some(post_pad) = &line.post_pad {
                    out.push(B_BRACKET_CLOSE);
                    out.extend_from_slice(post_pad.content());
                }
            }
            Line::KeyValue(line) => {
                out.extend_from_slice(line.key.content());
                if let Some(pad) = &line.post_key_pad {
                    out.extend_from_slice(pad.content());
                }
                if let Some(value) = &line.value {
                    out.push(B_EQUALS);
                    out.extend_from_slice(value.raw());
                }
            }
        }
        if let Some(comment) = self.comment() {
            out.push(comment.symbol());
            out.extend_from_slice(comment.content());
        }
    }

    /// The line's source bytes, without its newline.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_bytes(&mut out);
        out
    }
}
