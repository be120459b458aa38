/// Fenced code boundary with owned delimiter constant.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// A trimmed line opening or closing a fenced region: exactly three
    /// backticks, nothing else.
    pub fn is_boundary(trimmed: &str) -> bool {
        trimmed == Self::BACKTICKS
    }
}

/// Tracks whether a line sequence is currently inside a fenced region.
///
/// Fence content is raw: it is neither classified nor transformed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FenceTracker {
    open: bool,
}

impl FenceTracker {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }
}
