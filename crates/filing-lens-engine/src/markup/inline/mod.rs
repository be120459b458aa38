//! # Inline Substitution
//!
//! Turns one logical text span into an HTML fragment. The span is escaped
//! first, then substitutions run in a fixed order, each over the output of
//! the previous one:
//!
//! 1. `***x***` / `___x___` → strong + italic
//! 2. `**x**` / `__x__` → strong
//! 3. `*x*` / `_x_` → italic
//! 4. `` `x` `` → code
//! 5. status glyphs → tagged spans (see [`glyphs`])
//!
//! Longer emphasis runs go first so `***x***` is never split into a
//! `**` pair around stray `*`. Underscore emphasis needs a word boundary on
//! the outside, so identifiers such as `sec_tools_analysis` stay intact.
//!
//! Fenced code content never reaches this module.

pub mod glyphs;

use std::sync::OnceLock;

use regex::Regex;

pub use glyphs::{GlyphClass, STATUS_GLYPHS, tag_status_glyphs};

struct InlinePatterns {
    /// `(pattern, replacement)` in application order.
    emphasis: Vec<(Regex, &'static str)>,
    code: Regex,
    tag: Regex,
}

fn patterns() -> &'static InlinePatterns {
    static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let emphasis = [
            (r"\*\*\*(.+?)\*\*\*", "<strong><em>${1}</em></strong>"),
            (r"\b___(.+?)___\b", "<strong><em>${1}</em></strong>"),
            (r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
            (r"\b__(.+?)__\b", "<strong>${1}</strong>"),
            (r"\*([^\s*][^*]*?)\*", "<em>${1}</em>"),
            (r"\b_([^_]+?)_\b", "<em>${1}</em>"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("Invalid emphasis regex"),
                replacement,
            )
        })
        .collect();

        InlinePatterns {
            emphasis,
            code: Regex::new(r"`([^`]+)`").expect("Invalid code span regex"),
            tag: Regex::new(r"<[^>]*>").expect("Invalid tag regex"),
        }
    })
}

/// Renders one text span to an escaped, inline-substituted HTML fragment.
pub fn render_inline(text: &str) -> String {
    let patterns = patterns();
    let mut html = html_escape::encode_text(text).into_owned();

    for (pattern, replacement) in &patterns.emphasis {
        html = pattern.replace_all(&html, *replacement).into_owned();
    }
    html = patterns
        .code
        .replace_all(&html, "<code>${1}</code>")
        .into_owned();

    tag_status_glyphs(&html)
}

/// Strips tags from a rendered fragment and decodes entities.
///
/// Rendered fragments escape all literal `<`, so every remaining `<` opens
/// a tag inserted by [`render_inline`].
pub fn to_plain_text(fragment: &str) -> String {
    let stripped = patterns().tag.replace_all(fragment, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}
