use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// List item line type: `*`, `-`, `+` bullets or `<digits>.` numbers.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [char; 3] = ['*', '-', '+'];

    /// Parses a list marker followed by a space, returning the kind and item text.
    pub fn parse(trimmed: &str) -> Option<(ListKind, &str)> {
        if let Some(rest) = trimmed.strip_prefix(Self::BULLETS) {
            return rest
                .strip_prefix(' ')
                .map(|text| (ListKind::Unordered, text.trim_start()));
        }

        let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        trimmed[digits..]
            .strip_prefix(". ")
            .map(|text| (ListKind::Ordered, text.trim_start()))
    }
}
