use super::types::{Block, BlockEvent, BlockState, PreparedLine, Region};

/// Single-pass block assembly over prepared lines.
///
/// The state is an explicit [`BlockState`] value threaded through
/// [`reduce`]; the assembler only owns it between pushes.
#[derive(Debug, Default)]
pub struct BlockAssembler {
    state: BlockState,
    out: Vec<BlockEvent>,
}

impl BlockAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn push(&mut self, line: PreparedLine) {
        self.state = reduce(self.state, line, &mut self.out);
    }

    /// Closes any region still open at end of input.
    pub fn finish(mut self) -> Vec<BlockEvent> {
        close_region(self.state, &mut self.out);
        self.out
    }
}

/// Assembles a whole line sequence.
pub fn assemble(lines: impl IntoIterator<Item = PreparedLine>) -> Vec<BlockEvent> {
    let mut assembler = BlockAssembler::new();
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}

/// Consumes one line in `state`, appending events to `out`, and returns the
/// next state.
pub fn reduce(state: BlockState, line: PreparedLine, out: &mut Vec<BlockEvent>) -> BlockState {
    if state == BlockState::InCodeBlock {
        return match line {
            PreparedLine::Fence => {
                out.push(BlockEvent::Close(Region::Code));
                BlockState::Idle
            }
            other => {
                out.push(BlockEvent::Block(Block::CodeLine(other.into_text())));
                BlockState::InCodeBlock
            }
        };
    }

    match line {
        PreparedLine::Blank => {
            close_region(state, out);
            out.push(BlockEvent::Block(Block::Blank));
            BlockState::Idle
        }
        PreparedLine::Fence => {
            close_region(state, out);
            out.push(BlockEvent::Open(Region::Code));
            BlockState::InCodeBlock
        }
        PreparedLine::ListItem { kind, text } => {
            let next = BlockState::InList(kind);
            enter(state, next, out);
            out.push(BlockEvent::Block(Block::ListItem { kind, text }));
            next
        }
        PreparedLine::Blockquote(text) => {
            enter(state, BlockState::InBlockquote, out);
            out.push(BlockEvent::Block(Block::Blockquote(text)));
            BlockState::InBlockquote
        }
        PreparedLine::Heading { level, text } => {
            close_region(state, out);
            out.push(BlockEvent::Block(Block::Heading { level, text }));
            BlockState::Idle
        }
        PreparedLine::Rule => {
            close_region(state, out);
            out.push(BlockEvent::Block(Block::Rule));
            BlockState::Idle
        }
        PreparedLine::Text(text) | PreparedLine::Verbatim(text) => {
            close_region(state, out);
            out.push(BlockEvent::Block(Block::ParagraphLine(text)));
            BlockState::Idle
        }
    }
}

/// Moves into `next`, closing the current region and opening the new one
/// unless they are the same.
fn enter(current: BlockState, next: BlockState, out: &mut Vec<BlockEvent>) {
    if current == next {
        return;
    }
    close_region(current, out);
    if let Some(region) = next.region() {
        out.push(BlockEvent::Open(region));
    }
}

fn close_region(state: BlockState, out: &mut Vec<BlockEvent>) {
    if let Some(region) = state.region() {
        out.push(BlockEvent::Close(region));
    }
}
