//! Model capability consumed by a conversation
//!
//! The context only needs to know how many input tokens a model accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A language model as seen by the context window
///
/// `max_tokens` should stay stable for the lifetime of a conversation. If it
/// changes, the budget is only enforced as of each `add_message` call.
pub trait ModelCapability: fmt::Debug + Send + Sync {
    /// Model identifier (e.g., "gpt-3.5-turbo")
    fn name(&self) -> &str;

    /// Maximum number of input tokens accepted in one request
    fn max_tokens(&self) -> usize;
}

/// Shared read-only handle to a model
pub type SharedModel = Arc<dyn ModelCapability>;

/// Plain model description with a fixed budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    pub max_tokens: usize,
}

impl ModelSpec {
    pub fn new(name: impl Into<String>, max_tokens: usize) -> Self {
        Self {
            name: name.into(),
            max_tokens,
        }
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> SharedModel {
        Arc::new(self)
    }
}

impl ModelCapability for ModelSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_spec_capability() {
        let model = ModelSpec::new("gpt-4", 8192).shared();
        assert_eq!(model.name(), "gpt-4");
        assert_eq!(model.max_tokens(), 8192);
    }
}
