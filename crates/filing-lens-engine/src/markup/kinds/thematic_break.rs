/// Horizontal rule line type.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const RULES: [&'static str; 2] = ["---", "==="];

    pub fn is_rule(trimmed: &str) -> bool {
        Self::RULES.contains(&trimmed)
    }
}
