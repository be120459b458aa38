use serde::Serialize;

/// Semantic class attached to a status glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlyphClass {
    Success,
    Error,
    Warning,
    Info,
}

impl GlyphClass {
    pub fn as_str(self) -> &'static str {
        match self {
            GlyphClass::Success => "success",
            GlyphClass::Error => "error",
            GlyphClass::Warning => "warning",
            GlyphClass::Info => "info",
        }
    }
}

/// Glyph table. Variation-selector forms come before their bare forms so
/// the longer sequence wins.
pub const STATUS_GLYPHS: &[(&str, GlyphClass)] = &[
    ("\u{2705}", GlyphClass::Success),          // ✅
    ("\u{2714}\u{FE0F}", GlyphClass::Success),  // ✔️
    ("\u{2714}", GlyphClass::Success),          // ✔
    ("\u{274C}", GlyphClass::Error),            // ❌
    ("\u{2716}\u{FE0F}", GlyphClass::Error),    // ✖️
    ("\u{2716}", GlyphClass::Error),            // ✖
    ("\u{26A0}\u{FE0F}", GlyphClass::Warning),  // ⚠️
    ("\u{26A0}", GlyphClass::Warning),          // ⚠
    ("\u{2139}\u{FE0F}", GlyphClass::Info),     // ℹ️
    ("\u{2139}", GlyphClass::Info),             // ℹ
    ("\u{1F50D}", GlyphClass::Info),            // 🔍
    ("\u{1F4CA}", GlyphClass::Info),            // 📊
    ("\u{1F4A1}", GlyphClass::Info),            // 💡
    ("\u{1F3AF}", GlyphClass::Info),            // 🎯
];

/// Wraps every status glyph in `<span class="status-<class>">`.
///
/// Single left-to-right scan, so inserted markup is never rescanned.
pub fn tag_status_glyphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(c) = rest.chars().next() {
        for (glyph, class) in STATUS_GLYPHS {
            if let Some(after) = rest.strip_prefix(*glyph) {
                out.push_str("<span class=\"status-");
                out.push_str(class.as_str());
                out.push_str("\">");
                out.push_str(glyph);
                out.push_str("</span>");
                rest = after;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_success_and_error() {
        assert_eq!(
            tag_status_glyphs("✅ ok ❌ bad"),
            "<span class=\"status-success\">✅</span> ok \
             <span class=\"status-error\">❌</span> bad"
        );
    }

    #[test]
    fn variation_selector_stays_inside_span() {
        assert_eq!(
            tag_status_glyphs("⚠️ careful"),
            "<span class=\"status-warning\">⚠️</span> careful"
        );
    }

    #[test]
    fn info_family() {
        let tagged = tag_status_glyphs("🔍📊💡🎯");
        assert_eq!(tagged.matches("status-info").count(), 4);
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(tag_status_glyphs("no glyphs here"), "no glyphs here");
    }
}
