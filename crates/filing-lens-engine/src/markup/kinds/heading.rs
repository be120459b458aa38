/// ATX heading line type.
pub struct Heading;

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 4;

    /// Parses `#`..`####` followed by a space, returning `(level, text)`.
    pub fn parse(trimmed: &str) -> Option<(u8, &str)> {
        let level = trimmed.bytes().take_while(|&b| b == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let text = trimmed[level..].strip_prefix(' ')?;
        Some((level as u8, text.trim()))
    }
}
