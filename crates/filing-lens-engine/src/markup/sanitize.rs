use std::borrow::Cow;

use log::debug;

use super::{
    classify::{BannerKind, LineKind, ReportLineClassifier},
    kinds::FenceTracker,
};

/// Converts CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SanitizeState {
    Retaining,
    /// Inside a banner block: drop everything until real content.
    SkippingBanner,
    /// Inside a fenced block that opened within a banner block; dropped as a
    /// unit up to and including its closing fence.
    SkippingBannerCode,
}

/// Removes banner and metadata lines, keeping every other line verbatim.
///
/// A section marker opens a banner block which swallows all following lines
/// until the first text or heading line that is not itself banner content.
/// Outside banner blocks each line is filtered on its own classification.
/// Fenced code outside banner blocks is always retained; a fence opened
/// inside a banner block is dropped together with its closing fence.
///
/// `sanitize(&sanitize(x)) == sanitize(x)` for any input.
pub fn sanitize(raw: &str) -> String {
    let normalized = normalize_line_endings(raw);
    let classifier = ReportLineClassifier;
    let mut state = SanitizeState::Retaining;
    let mut fence = FenceTracker::default();
    let mut kept: Vec<&str> = Vec::new();

    for (number, raw_line) in normalized.split('\n').enumerate() {
        let line = classifier.classify(raw_line);

        if fence.is_open() {
            if line.kind == LineKind::CodeFence {
                fence.toggle();
            }
            kept.push(raw_line);
            continue;
        }

        state = match (state, line.kind) {
            (SanitizeState::SkippingBanner, LineKind::Text | LineKind::Heading { .. }) => {
                debug!("banner block ends at line {}", number + 1);
                kept.push(raw_line);
                SanitizeState::Retaining
            }
            (SanitizeState::SkippingBanner, LineKind::CodeFence) => {
                SanitizeState::SkippingBannerCode
            }
            (SanitizeState::SkippingBanner, _) => SanitizeState::SkippingBanner,
            (SanitizeState::SkippingBannerCode, LineKind::CodeFence) => {
                SanitizeState::SkippingBanner
            }
            (SanitizeState::SkippingBannerCode, _) => SanitizeState::SkippingBannerCode,
            (SanitizeState::Retaining, LineKind::Banner(BannerKind::SectionMarker)) => {
                debug!("banner opens at line {}: {}", number + 1, line.trimmed);
                SanitizeState::SkippingBanner
            }
            (SanitizeState::Retaining, LineKind::Banner(_)) => SanitizeState::Retaining,
            (SanitizeState::Retaining, kind) => {
                if kind == LineKind::CodeFence {
                    fence.toggle();
                }
                kept.push(raw_line);
                SanitizeState::Retaining
            }
        };
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_metadata_prose_keeps_only_prose() {
        let raw = "=== COMPREHENSIVE SEC ANALYSIS ===\nOriginal Query: apple\nApple sells phones.";
        assert_eq!(sanitize(raw), "Apple sells phones.");
    }

    #[test]
    fn variable_length_header_is_skipped() {
        let raw = "\
=== COMPREHENSIVE SEC ANALYSIS ===
Original Query: apple risks
Enhanced Query: apple risk factors 2024
Analysis Scope: 10-K, 8-K
Generated: 2024-05-01 10:00:00
================================================================================

INDIVIDUAL TOOL RESULTS:
----------------------------------------
SEC_TOOLS: SUCCESS
  Individual File: dir/sec_tools_analysis.txt
SEC_8K_ANALYZER: FAILED
  Error: timeout

================================================================================

COMPREHENSIVE COMBINED ANALYSIS:
================================================================================
# Apple Risk Overview

Supply chain concentration remains the top risk.";

        assert_eq!(
            sanitize(raw),
            "# Apple Risk Overview\n\nSupply chain concentration remains the top risk."
        );
    }

    #[test]
    fn list_lines_do_not_end_a_banner_block() {
        let raw = "FILES CREATED:\n- a.txt\n- b.txt\nReal content";
        assert_eq!(sanitize(raw), "Real content");
    }

    #[test]
    fn stray_noise_outside_banner_is_dropped_individually() {
        let raw = "Intro\n----------\nGenerated: now\nOutro";
        assert_eq!(sanitize(raw), "Intro\nOutro");
    }

    #[test]
    fn keeps_internal_spacing() {
        let raw = "  indented text\n\n- item   with  gaps";
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn fenced_content_is_verbatim() {
        let raw = "```\n==========\nQuery: inside code\n```\nafter";
        assert_eq!(sanitize(raw), raw);
    }

    #[test]
    fn fence_inside_banner_is_dropped_with_its_closing_fence() {
        let raw = "=== COMPREHENSIVE SEC ANALYSIS ===\nGenerated: now\n\
                   ```\ncode line\n```\n## Heading\nBody text";
        assert_eq!(sanitize(raw), "## Heading\nBody text");
    }

    #[test]
    fn banner_text_inside_banner_fence_does_not_end_the_banner() {
        let raw = "FILES CREATED:\n```\nplain words\n# not content\n```\nQuery: x\nReal content";
        assert_eq!(sanitize(raw), "Real content");
    }

    #[test]
    fn normalizes_crlf() {
        assert_eq!(sanitize("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "",
            "plain",
            "=== SEC ANALYSIS INDEX ===\nQuery: x\n```\ncode\n```\ntext",
            "INDIVIDUAL ANALYSIS DETAILS:\n====\n### SEC TOOLS ANALYSIS\n**Tool Focus**: 10-K\n\
             ------\nbody\n[... See individual file for complete analysis ...]",
            "```\nunterminated\n=== COMPREHENSIVE SEC ANALYSIS ===",
            "a\r\n\r\n========\r\nb\r\n",
            "=== SEC ANALYSIS INDEX ===\n```\nhidden\n```\nshown\n```\nkept\n```",
            "FILES CREATED:\n```\nnever closed",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input: {input:?}");
        }
    }
}
