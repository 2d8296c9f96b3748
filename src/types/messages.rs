//! Message types held by a conversation
//!
//! A message carries its token cost with it; the cost is computed once by
//! whatever tokenizer the caller uses and never re-derived here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::context::counter::TokenCounter;
use crate::errors::ValidationError;

/// Anything with a fixed token cost
///
/// Implementations must be deterministic: the same value always reports the
/// same count.
pub trait TokenCost {
    fn token_count(&self) -> usize;
}

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Immutable chat message with a precomputed token cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: Uuid,
    role: Role,
    content: String,
    token_count: usize,
    created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message whose cost was measured by an external tokenizer
    pub fn new(
        role: Role,
        content: impl Into<String>,
        token_count: usize,
    ) -> std::result::Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            role,
            content,
            token_count,
            created_at: Utc::now(),
        })
    }

    /// Create a message costed with the heuristic counter
    pub fn estimated(
        role: Role,
        content: impl Into<String>,
        counter: &TokenCounter,
    ) -> std::result::Result<Self, ValidationError> {
        let content = content.into();
        let tokens = counter.estimate(&content);
        Self::new(role, content, tokens)
    }

    pub fn system(
        content: impl Into<String>,
        token_count: usize,
    ) -> std::result::Result<Self, ValidationError> {
        Self::new(Role::System, content, token_count)
    }

    pub fn user(
        content: impl Into<String>,
        token_count: usize,
    ) -> std::result::Result<Self, ValidationError> {
        Self::new(Role::User, content, token_count)
    }

    pub fn assistant(
        content: impl Into<String>,
        token_count: usize,
    ) -> std::result::Result<Self, ValidationError> {
        Self::new(Role::Assistant, content, token_count)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TokenCost for Message {
    fn token_count(&self) -> usize {
        self.token_count
    }
}
