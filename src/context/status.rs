//! Conversation lifecycle state machine
//!
//! Two states, one terminal:
//! - Active → Active (on: MessageAdded)
//! - Active → Ended  (on: End)
//! - Ended  → Ended  (on: End, no-op)
//! - Ended  ✗ MessageAdded (rejected with `ChatEnded`)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ContextError, Result, ValidationError};

/// Lifecycle status of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    /// Accepting messages
    Active,

    /// Closed for good (terminal)
    Ended,
}

/// Events that drive the status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    MessageAdded,
    End,
}

impl ChatStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatStatus::Ended)
    }

    /// Next status for an event
    pub fn transition(&self, event: ChatEvent) -> Result<ChatStatus> {
        match (self, event) {
            (ChatStatus::Active, ChatEvent::MessageAdded) => Ok(ChatStatus::Active),
            (ChatStatus::Active, ChatEvent::End) => Ok(ChatStatus::Ended),
            (ChatStatus::Ended, ChatEvent::End) => Ok(ChatStatus::Ended),
            (ChatStatus::Ended, ChatEvent::MessageAdded) => Err(ContextError::ChatEnded),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatStatus::Active => "active",
            ChatStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the tags a storage layer may hand back
impl FromStr for ChatStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(ChatStatus::Active),
            "ended" => Ok(ChatStatus::Ended),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }
}
