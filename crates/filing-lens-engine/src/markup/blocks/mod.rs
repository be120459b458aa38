//! # Block Assembly
//!
//! Walks prepared lines once and emits blocks interleaved with region
//! boundaries.
//!
//! ## States
//!
//! `Idle`, `InList(kind)`, `InBlockquote`, `InCodeBlock`. At most one region
//! is open at a time; regions never nest.
//!
//! - A blank line closes a list or blockquote and emits `Blank`. Inside a
//!   code block it is just another code line.
//! - A fence toggles the code block. Code content is emitted verbatim.
//! - A list item opens a list of its kind, closing a list of the other kind.
//! - A quote line opens a blockquote.
//! - Headings, rules and text close any open region.
//! - End of input closes whatever is still open.

pub mod assembler;
pub mod types;

pub use assembler::{BlockAssembler, assemble, reduce};
pub use types::{Block, BlockEvent, BlockState, NO_CONTENT_TEXT, PreparedLine, Region};
