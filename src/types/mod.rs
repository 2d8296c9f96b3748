//! Type definitions module
//!
//! Messages, the model capability, and generation settings.

pub mod messages;
pub mod model;
pub mod generation;

// Re-export commonly used types
pub use messages::{Message, Role, TokenCost};
pub use model::{ModelCapability, ModelSpec, SharedModel};
pub use generation::GenerationConfig;
