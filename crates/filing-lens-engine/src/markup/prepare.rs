use super::{
    blocks::PreparedLine,
    classify::{LineKind, ReportLineClassifier},
    inline::render_inline,
    kinds::FenceTracker,
};

/// Classifies sanitized lines and renders their inline payloads.
///
/// Lines inside a fenced region bypass classification and inline
/// substitution; they are only escaped.
pub fn prepare_lines(sanitized: &str) -> Vec<PreparedLine> {
    let classifier = ReportLineClassifier;
    let mut fence = FenceTracker::default();

    sanitized
        .split('\n')
        .map(|raw| {
            let line = classifier.classify(raw);

            if fence.is_open() {
                if line.kind == LineKind::CodeFence {
                    fence.toggle();
                    return PreparedLine::Fence;
                }
                return PreparedLine::Verbatim(html_escape::encode_text(raw).into_owned());
            }

            match line.kind {
                LineKind::Blank => PreparedLine::Blank,
                LineKind::CodeFence => {
                    fence.toggle();
                    PreparedLine::Fence
                }
                LineKind::Heading { level } => PreparedLine::Heading {
                    level,
                    text: render_inline(line.content),
                },
                LineKind::ListItem(kind) => PreparedLine::ListItem {
                    kind,
                    text: render_inline(line.content),
                },
                LineKind::Blockquote => PreparedLine::Blockquote(render_inline(line.content)),
                LineKind::Rule => PreparedLine::Rule,
                // Banner lines only get here when the caller skipped
                // sanitizing; they degrade to text.
                LineKind::Text | LineKind::Banner(_) => {
                    PreparedLine::Text(render_inline(line.trimmed))
                }
            }
        })
        .collect()
}
