use serde::Serialize;

use super::kinds::{Banner, BlockQuote, CodeFence, Heading, ListItem, ListKind, ThematicBreak};

/// Why a line counts as technical banner content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BannerKind {
    /// A known report-header marker; opens a banner block.
    SectionMarker,
    /// A run of more than five `=` or `-`.
    Delimiter,
    /// A `<label>: value` metadata field.
    Metadata,
    /// A literal filler line.
    Noise,
}

/// Classification of a single line, local facts only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Blank,
    Banner(BannerKind),
    Heading { level: u8 },
    ListItem(ListKind),
    Blockquote,
    CodeFence,
    Rule,
    Text,
}

/// One line of a report after newline normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line exactly as it appeared.
    pub raw: &'a str,
    /// The line with surrounding whitespace removed.
    pub trimmed: &'a str,
    pub kind: LineKind,
    /// Text payload with the construct's marker stripped (heading hashes,
    /// list bullet, quote prefix). Equal to `trimmed` for everything else.
    pub content: &'a str,
}

/// Classifies individual report lines.
///
/// Precedence, highest first: blank, banner, heading, list item,
/// blockquote, code fence, rule, text.
pub struct ReportLineClassifier;

impl ReportLineClassifier {
    pub fn classify<'a>(&self, raw: &'a str) -> Line<'a> {
        let trimmed = raw.trim();
        let (kind, content) = classify_trimmed(trimmed);
        Line {
            raw,
            trimmed,
            kind,
            content,
        }
    }
}

fn classify_trimmed(trimmed: &str) -> (LineKind, &str) {
    if trimmed.is_empty() {
        return (LineKind::Blank, trimmed);
    }
    if let Some(banner) = banner_kind(trimmed) {
        return (LineKind::Banner(banner), trimmed);
    }
    if let Some((level, text)) = Heading::parse(trimmed) {
        return (LineKind::Heading { level }, text);
    }
    if let Some((kind, text)) = ListItem::parse(trimmed) {
        return (LineKind::ListItem(kind), text);
    }
    if let Some(text) = BlockQuote::strip_prefix(trimmed) {
        return (LineKind::Blockquote, text);
    }
    if CodeFence::is_boundary(trimmed) {
        return (LineKind::CodeFence, trimmed);
    }
    if ThematicBreak::is_rule(trimmed) {
        return (LineKind::Rule, trimmed);
    }
    (LineKind::Text, trimmed)
}

fn banner_kind(trimmed: &str) -> Option<BannerKind> {
    if Banner::is_section_marker(trimmed) {
        Some(BannerKind::SectionMarker)
    } else if Banner::is_delimiter(trimmed) {
        Some(BannerKind::Delimiter)
    } else if Banner::is_metadata(trimmed) {
        Some(BannerKind::Metadata)
    } else if Banner::is_noise_literal(trimmed) {
        Some(BannerKind::Noise)
    } else {
        None
    }
}
