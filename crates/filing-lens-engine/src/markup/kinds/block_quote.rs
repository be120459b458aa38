/// Blockquote line type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips the `> ` prefix from a trimmed line, returning the quoted text.
    ///
    /// A lone `>` is an empty quote line. Nested quotes are not recognised;
    /// `>> text` quotes the literal `> text`.
    pub fn strip_prefix(trimmed: &str) -> Option<&str> {
        let rest = trimmed.strip_prefix(Self::PREFIX)?;
        if rest.is_empty() {
            return Some("");
        }
        rest.strip_prefix(' ').map(str::trim_start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefix("hello"), None);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefix("> hello"), Some("hello"));
    }

    #[test]
    fn bare_prefix_is_empty_quote() {
        assert_eq!(BlockQuote::strip_prefix(">"), Some(""));
    }

    #[test]
    fn prefix_without_space_is_not_a_quote() {
        assert_eq!(BlockQuote::strip_prefix(">hello"), None);
    }
}
