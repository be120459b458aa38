/// Technical header vocabulary written by the upstream report generators.
///
/// All knowledge of what a banner looks like lives here: the section
/// markers that open a banner block, the delimiter rules, the metadata
/// field labels and the literal noise lines.
pub struct Banner;

impl Banner {
    /// Trimmed lines that open a banner block.
    pub const SECTION_MARKERS: &'static [&'static str] = &[
        "=== COMPREHENSIVE SEC ANALYSIS ===",
        "=== SEC ANALYSIS INDEX ===",
        "=== SEC 8-K CURRENT EVENTS ANALYSIS ===",
        "=== INSIDER TRADING ANALYSIS ===",
        "INDIVIDUAL TOOL RESULTS:",
        "COMPREHENSIVE COMBINED ANALYSIS:",
        "INDIVIDUAL ANALYSIS DETAILS:",
        "FILES CREATED:",
    ];

    /// Field labels of metadata lines (`<label>: value`).
    pub const METADATA_LABELS: &'static [&'static str] = &[
        "Original Query",
        "Enhanced Query",
        "Tool Query",
        "Analysis Scope",
        "Generated",
        "Execution Time",
        "Query",
        "Company",
        "Analysis Focus",
        "Time Period",
        "Date Range",
        "Timestamp",
        "Analysis Directory",
        "Individual File",
        "Original Output",
        "Error",
        "Total Files",
        "Successful Analyses",
    ];

    /// Literal lines that are dropped without opening a banner block.
    pub const NOISE_LITERALS: &'static [&'static str] =
        &["[... See individual file for complete analysis ...]"];

    /// Delimiter runs must be strictly longer than this.
    pub const DELIMITER_MIN_EXCLUSIVE: usize = 5;

    const FRAME: &'static str = "===";

    pub fn is_section_marker(trimmed: &str) -> bool {
        Self::SECTION_MARKERS.contains(&trimmed) || Self::is_framed_title(trimmed)
    }

    /// `=== SEC TOOLS ANALYSIS ===` style per-tool headers.
    fn is_framed_title(trimmed: &str) -> bool {
        let Some(inner) = trimmed
            .strip_prefix(Self::FRAME)
            .and_then(|rest| rest.strip_suffix(Self::FRAME))
        else {
            return false;
        };
        let inner = inner.trim();
        inner.chars().any(|c| c.is_ascii_uppercase()) && !inner.chars().any(char::is_lowercase)
    }

    pub fn is_delimiter(trimmed: &str) -> bool {
        trimmed.len() > Self::DELIMITER_MIN_EXCLUSIVE
            && (trimmed.bytes().all(|b| b == b'=') || trimmed.bytes().all(|b| b == b'-'))
    }

    pub fn is_metadata(trimmed: &str) -> bool {
        let Some((label, value)) = trimmed.split_once(':') else {
            return false;
        };
        Self::METADATA_LABELS.contains(&label) || Self::is_tool_status(label, value)
    }

    /// `SEC_TOOLS: SUCCESS` / `SEC_8K_ANALYZER: FAILED`
    fn is_tool_status(label: &str, value: &str) -> bool {
        !label.is_empty()
            && label.bytes().all(Self::is_tool_name_byte)
            && matches!(value.trim(), "SUCCESS" | "FAILED")
    }

    fn is_tool_name_byte(b: u8) -> bool {
        b.is_ascii_uppercase() || b.is_ascii_digit() || matches!(b, b'_' | b' ' | b'-')
    }

    pub fn is_noise_literal(trimmed: &str) -> bool {
        Self::NOISE_LITERALS.contains(&trimmed)
    }
}
