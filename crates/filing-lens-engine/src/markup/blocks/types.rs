use serde::Serialize;

use crate::markup::kinds::ListKind;

/// Text fixed for the placeholder shown when a report has nothing to render.
pub const NO_CONTENT_TEXT: &str = "No content available.";

/// A line after heading detection and inline substitution, ready for block
/// assembly. Text payloads are already HTML fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PreparedLine {
    Blank,
    Heading { level: u8, text: String },
    ListItem { kind: ListKind, text: String },
    Blockquote(String),
    /// A code fence boundary.
    Fence,
    Rule,
    Text(String),
    /// Content inside a fenced region: escaped, otherwise untouched.
    Verbatim(String),
}

impl PreparedLine {
    /// The line's payload, for use as a code line.
    pub fn into_text(self) -> String {
        match self {
            PreparedLine::Heading { text, .. }
            | PreparedLine::ListItem { text, .. }
            | PreparedLine::Blockquote(text)
            | PreparedLine::Text(text)
            | PreparedLine::Verbatim(text) => text,
            PreparedLine::Blank | PreparedLine::Fence | PreparedLine::Rule => String::new(),
        }
    }
}

/// A container region that groups consecutive blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Region {
    List(ListKind),
    Blockquote,
    Code,
}

/// An emitted unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Heading { level: u8, text: String },
    ListItem { kind: ListKind, text: String },
    ParagraphLine(String),
    Blockquote(String),
    CodeLine(String),
    Rule,
    Blank,
    /// Soft separator left where two blockquote regions were merged.
    SoftBreak,
    /// Placeholder for a report with no renderable content.
    NoContent,
}

impl Block {
    /// Blank lines and empty paragraphs, which cleanup collapses.
    pub fn is_blank(&self) -> bool {
        match self {
            Block::Blank => true,
            Block::ParagraphLine(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// Output of block assembly: region boundaries interleaved with blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockEvent {
    Open(Region),
    Close(Region),
    Block(Block),
}

/// The assembler's open region. Regions are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Idle,
    InList(ListKind),
    InBlockquote,
    InCodeBlock,
}

impl BlockState {
    /// The region this state holds open, if any.
    pub fn region(self) -> Option<Region> {
        match self {
            BlockState::Idle => None,
            BlockState::InList(kind) => Some(Region::List(kind)),
            BlockState::InBlockquote => Some(Region::Blockquote),
            BlockState::InCodeBlock => Some(Region::Code),
        }
    }
}
