use std::fmt;

use serde::Serialize;

use super::{
    blocks::{Block, BlockEvent, NO_CONTENT_TEXT, Region},
    inline::to_plain_text,
    kinds::ListKind,
};

/// Final pass over assembled events.
///
/// - A blockquote closed and immediately reopened (blank lines between) is
///   merged into one region with a [`Block::SoftBreak`] at the seam.
/// - Runs of blank lines and empty paragraphs collapse to one `Blank`;
///   leading and trailing blanks are dropped.
/// - Output without any block becomes a single [`Block::NoContent`].
pub fn cleanup(events: Vec<BlockEvent>) -> Vec<BlockEvent> {
    let merged = merge_quote_gaps(events);
    let collapsed = collapse_blanks(merged);

    if collapsed.iter().any(|e| matches!(e, BlockEvent::Block(_))) {
        collapsed
    } else {
        vec![BlockEvent::Block(Block::NoContent)]
    }
}

fn is_blank_event(event: &BlockEvent) -> bool {
    matches!(event, BlockEvent::Block(block) if block.is_blank())
}

fn merge_quote_gaps(events: Vec<BlockEvent>) -> Vec<BlockEvent> {
    let mut out: Vec<BlockEvent> = Vec::with_capacity(events.len());

    for event in events {
        if event == BlockEvent::Open(Region::Blockquote) {
            let gap_start = out
                .iter()
                .rposition(|e| !is_blank_event(e))
                .map_or(0, |i| i + 1);
            if gap_start > 0 && out[gap_start - 1] == BlockEvent::Close(Region::Blockquote) {
                out.truncate(gap_start - 1);
                out.push(BlockEvent::Block(Block::SoftBreak));
                continue;
            }
        }
        out.push(event);
    }

    out
}

fn collapse_blanks(events: Vec<BlockEvent>) -> Vec<BlockEvent> {
    let mut out: Vec<BlockEvent> = Vec::with_capacity(events.len());

    for event in events {
        if is_blank_event(&event) {
            if out.last().is_none_or(is_blank_event) {
                continue;
            }
            out.push(BlockEvent::Block(Block::Blank));
        } else {
            out.push(event);
        }
    }
    while out.last().is_some_and(is_blank_event) {
        out.pop();
    }

    out
}

/// Rendered report, ready for display.
///
/// Always holds at least one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Markup {
    events: Vec<BlockEvent>,
}

/// Visual role of a line in the terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlainStyle {
    Heading(u8),
    ListItem,
    Quote,
    Code,
    Rule,
    Text,
    Blank,
    Placeholder,
}

/// One tag-free display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainLine {
    pub style: PlainStyle,
    pub text: String,
}

impl PlainLine {
    fn new(style: PlainStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }
}

impl Markup {
    /// Wraps assembled events, running [`cleanup`] on them.
    pub fn from_events(events: Vec<BlockEvent>) -> Self {
        Self {
            events: cleanup(events),
        }
    }

    pub fn no_content() -> Self {
        Self {
            events: vec![BlockEvent::Block(Block::NoContent)],
        }
    }

    pub fn events(&self) -> &[BlockEvent] {
        &self.events
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.events.iter().filter_map(|e| match e {
            BlockEvent::Block(block) => Some(block),
            _ => None,
        })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(
            self.events.as_slice(),
            [BlockEvent::Block(Block::NoContent)]
        )
    }

    /// Renders block-level HTML, one element per line.
    pub fn to_html(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut code: Option<Vec<&str>> = None;

        for event in &self.events {
            match event {
                BlockEvent::Open(Region::Code) => code = Some(Vec::new()),
                BlockEvent::Close(Region::Code) => {
                    let lines = code.take().unwrap_or_default();
                    parts.push(format!("<pre><code>{}</code></pre>", lines.join("\n")));
                }
                BlockEvent::Block(Block::CodeLine(text)) => {
                    code.get_or_insert_with(Vec::new).push(text);
                }
                BlockEvent::Open(Region::List(ListKind::Ordered)) => parts.push("<ol>".into()),
                BlockEvent::Open(Region::List(ListKind::Unordered)) => parts.push("<ul>".into()),
                BlockEvent::Close(Region::List(ListKind::Ordered)) => parts.push("</ol>".into()),
                BlockEvent::Close(Region::List(ListKind::Unordered)) => parts.push("</ul>".into()),
                BlockEvent::Open(Region::Blockquote) => parts.push("<blockquote>".into()),
                BlockEvent::Close(Region::Blockquote) => parts.push("</blockquote>".into()),
                BlockEvent::Block(block) => {
                    if let Some(html) = block_html(block) {
                        parts.push(html);
                    }
                }
            }
        }

        parts.join("\n")
    }

    /// Tag-free line view with entities decoded, for terminals.
    pub fn to_plain_lines(&self) -> Vec<PlainLine> {
        let mut lines = Vec::new();
        let mut ordinal = 0usize;

        for event in &self.events {
            let block = match event {
                BlockEvent::Open(Region::List(_)) => {
                    ordinal = 0;
                    continue;
                }
                BlockEvent::Open(_) | BlockEvent::Close(_) => continue,
                BlockEvent::Block(block) => block,
            };

            let line = match block {
                Block::Heading { level, text } => {
                    PlainLine::new(PlainStyle::Heading(*level), to_plain_text(text))
                }
                Block::ListItem { kind, text } => {
                    let marker = match kind {
                        ListKind::Ordered => {
                            ordinal += 1;
                            format!("{ordinal}.")
                        }
                        ListKind::Unordered => "•".to_string(),
                    };
                    PlainLine::new(
                        PlainStyle::ListItem,
                        format!("{marker} {}", to_plain_text(text)),
                    )
                }
                Block::ParagraphLine(text) => PlainLine::new(PlainStyle::Text, to_plain_text(text)),
                Block::Blockquote(text) => {
                    PlainLine::new(PlainStyle::Quote, format!("│ {}", to_plain_text(text)))
                }
                Block::CodeLine(text) => {
                    PlainLine::new(PlainStyle::Code, format!("    {}", to_plain_text(text)))
                }
                Block::Rule => PlainLine::new(PlainStyle::Rule, "─".repeat(40)),
                Block::Blank => PlainLine::new(PlainStyle::Blank, ""),
                Block::SoftBreak => PlainLine::new(PlainStyle::Quote, "│"),
                Block::NoContent => PlainLine::new(PlainStyle::Placeholder, NO_CONTENT_TEXT),
            };
            lines.push(line);
        }

        lines
    }
}

fn block_html(block: &Block) -> Option<String> {
    let html = match block {
        Block::Heading { level, text } => format!("<h{level}>{text}</h{level}>"),
        Block::ListItem { text, .. } => format!("<li>{text}</li>"),
        Block::ParagraphLine(text) | Block::Blockquote(text) => format!("<p>{text}</p>"),
        Block::CodeLine(text) => text.clone(),
        Block::Rule => "<hr>".to_string(),
        Block::SoftBreak => "<br>".to_string(),
        Block::NoContent => format!("<p class=\"no-content\">{NO_CONTENT_TEXT}</p>"),
        Block::Blank => return None,
    };
    Some(html)
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
