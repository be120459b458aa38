//! Property-based invariants for the markup pipeline.
//!
//! Inputs are built from report-shaped lines: section markers, metadata,
//! delimiters, fences, lists, quotes, headings and prose, joined with a mix
//! of LF, CRLF and lone CR endings.
//!
//! 1. Sanitizing is idempotent.
//! 2. `transform` always yields at least one event.
//! 3. Regions never nest and every open region is closed.
//! 4. Transforming sanitized text gives the same markup.

use filing_lens_engine::markup::{BlockEvent, sanitize, transform};
use proptest::prelude::*;

fn report_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("=== COMPREHENSIVE SEC ANALYSIS ===".to_string()),
        Just("=== SEC TOOLS ANALYSIS ===".to_string()),
        Just("FILES CREATED:".to_string()),
        Just("Original Query: apple risks".to_string()),
        Just("SEC_TOOLS: SUCCESS".to_string()),
        Just("[... See individual file for complete analysis ...]".to_string()),
        Just("=".repeat(40)),
        Just("-".repeat(40)),
        Just("```".to_string()),
        Just("```json".to_string()),
        Just("---".to_string()),
        Just(String::new()),
        "[a-z ]{1,12}".prop_map(|w| format!("- {w}")),
        "[a-z ]{1,12}".prop_map(|w| format!("2. {w}")),
        "[a-z ]{1,12}".prop_map(|w| format!("> {w}")),
        (1usize..=4, "[A-Za-z ]{1,12}").prop_map(|(n, w)| format!("{} {w}", "#".repeat(n))),
        "[A-Za-z*`_<&✅⚠ ]{1,24}",
    ]
}

fn line_ending() -> impl Strategy<Value = String> {
    prop_oneof![Just("\n"), Just("\r\n"), Just("\r")].prop_map(String::from)
}

fn report() -> impl Strategy<Value = String> {
    prop::collection::vec((report_line(), line_ending()), 0..24)
        .prop_map(|lines| lines.into_iter().map(|(line, end)| line + &end).collect())
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(raw in report()) {
        let once = sanitize(&raw);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn transform_is_never_empty(raw in report()) {
        let markup = transform(raw.as_str());
        prop_assert!(!markup.events().is_empty());
        prop_assert!(!markup.to_html().is_empty());
    }

    #[test]
    fn regions_are_balanced_and_flat(raw in report()) {
        let markup = transform(raw.as_str());
        let mut open = None;
        for event in markup.events() {
            match event {
                BlockEvent::Open(region) => {
                    prop_assert!(open.is_none(), "{:?} opened inside {:?}", region, open);
                    open = Some(*region);
                }
                BlockEvent::Close(region) => {
                    prop_assert_eq!(open.take(), Some(*region));
                }
                BlockEvent::Block(_) => {}
            }
        }
        prop_assert!(open.is_none(), "{:?} left open", open);
    }

    #[test]
    fn sanitized_text_transforms_identically(raw in report()) {
        prop_assert_eq!(transform(sanitize(&raw).as_str()), transform(raw.as_str()));
    }
}
