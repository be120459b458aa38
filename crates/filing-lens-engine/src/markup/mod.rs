//! # Report Markup
//!
//! Converts semi-structured analysis report text into sanitized block-level
//! HTML.
//!
//! ## Pipeline
//!
//! 1. **Normalize** CRLF / CR line endings to LF
//! 2. **Sanitize** (`sanitize`): drop banner blocks, delimiters and metadata
//! 3. **Prepare** (`prepare`): classify each line, render inline payloads
//! 4. **Assemble** (`blocks`): single-pass state machine emitting blocks and
//!    region boundaries
//! 5. **Cleanup** (`render`): merge adjacent quote regions, collapse blanks
//!
//! ## Modules
//!
//! - **`kinds`**: per-construct syntax knowledge (banner, heading, list, quote, fence, rule)
//! - **`classify`**: `ReportLineClassifier` assigns one `LineKind` per line
//! - **`sanitize`**: banner stripping with an explicit skip sub-state
//! - **`inline`**: emphasis, code spans and status glyphs
//! - **`prepare`**: per-line classification plus inline rendering
//! - **`blocks`**: `BlockAssembler` and the `reduce` function
//! - **`render`**: cleanup pass and the `Markup` output type
//!
//! The whole pipeline is pure and total: no input makes it fail, and the
//! output always holds at least one block.

pub mod blocks;
pub mod classify;
pub mod inline;
pub mod kinds;
pub mod prepare;
pub mod render;
pub mod sanitize;

pub use blocks::{Block, BlockEvent, BlockState, Region};
pub use classify::{BannerKind, Line, LineKind, ReportLineClassifier};
pub use kinds::ListKind;
pub use render::{Markup, PlainLine, PlainStyle};
pub use sanitize::{normalize_line_endings, sanitize};

/// Transforms raw report text into renderable markup.
///
/// Absent, empty or whitespace-only input yields the fixed "no content"
/// placeholder, as does input made only of banner content.
pub fn transform<'a>(raw: impl Into<Option<&'a str>>) -> Markup {
    let Some(raw) = raw.into().filter(|r| !r.trim().is_empty()) else {
        return Markup::no_content();
    };

    let normalized = normalize_line_endings(raw);
    let sanitized = sanitize(&normalized);
    let lines = prepare::prepare_lines(&sanitized);
    Markup::from_events(blocks::assemble(lines))
}
