//! Context management module
//!
//! Conversation state, lifecycle, and token accounting.

pub mod counter;
pub mod status;
pub mod conversation;

// Re-export commonly used types
pub use counter::{total_cost, TokenCounter};
pub use status::{ChatEvent, ChatStatus};
pub use conversation::{ConversationContext, ConversationSnapshot};
