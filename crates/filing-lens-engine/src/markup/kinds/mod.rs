//! Line types with owned delimiters.
//!
//! Each kind owns the syntax knowledge for one construct so the classifier
//! only decides precedence.

pub mod banner;
pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod list_item;
pub mod thematic_break;

pub use banner::Banner;
pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceTracker};
pub use heading::Heading;
pub use list_item::{ListItem, ListKind};
pub use thematic_break::ThematicBreak;
