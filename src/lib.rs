//! chatwindow - Bounded conversation context
//!
//! Keeps the messages of one chat session under a model's input-token budget,
//! archiving the oldest messages once a new one would not fit.
//!
//! # Architecture
//!
//! - **Core**: `context::ConversationContext` + lifecycle status
//! - **Capabilities**: `types::ModelCapability` (budget), `types::TokenCost` (message cost)
//! - **CLI**: config file, transcript replay

pub mod errors;
pub mod types;
pub mod context;
pub mod cli;

// Re-export commonly used types
pub use errors::{ContextError, Result, ValidationError};
pub use context::{ChatStatus, ConversationContext};
pub use types::{GenerationConfig, Message, ModelCapability, ModelSpec, Role, TokenCost};
