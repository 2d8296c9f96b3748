//! Bounded conversation context
//!
//! Holds the messages of one chat under the model's input-token budget.
//! When a new message would not fit, the oldest active messages move to an
//! append-only archive until it does:
//!
//! ```text
//! history:  m₁ m₂ … mₖ | mₖ₊₁ … mₙ
//!           archived     active      Σ cost(active) ≤ max_tokens
//! ```
//!
//! Eviction is positional only. The initial system message goes through the
//! same path as every other message and can be evicted like any of them.
//!
//! # Concurrency
//!
//! Mutators take `&mut self`. A context shared across threads must be wrapped
//! in a lock (or owned by a single task) by whoever holds it.

use serde::Serialize;
use std::collections::VecDeque;
use uuid::Uuid;

use crate::context::counter::total_cost;
use crate::context::status::{ChatEvent, ChatStatus};
use crate::errors::{ContextError, Result, ValidationError};
use crate::types::{GenerationConfig, Message, TokenCost};

/// State of a single chat session
#[derive(Debug, Clone)]
pub struct ConversationContext<M: TokenCost + Clone = Message> {
    id: String,
    owner_id: String,
    initial_system_message: M,

    /// Oldest at the front
    messages: VecDeque<M>,

    /// First evicted at the front
    archived: Vec<M>,

    status: ChatStatus,

    /// Σ cost(messages), recomputed after every mutation
    token_usage: usize,

    config: GenerationConfig,
}

impl<M: TokenCost + Clone> ConversationContext<M> {
    /// Start a conversation with a fresh id
    pub fn create(
        owner_id: impl Into<String>,
        initial_system_message: M,
        config: GenerationConfig,
    ) -> Result<Self> {
        Self::with_id(
            Uuid::new_v4().to_string(),
            owner_id,
            initial_system_message,
            config,
        )
    }

    /// Start a conversation under an id issued elsewhere
    ///
    /// Fails without returning a context if validation fails or the system
    /// message alone exceeds the model budget.
    pub fn with_id(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        initial_system_message: M,
        config: GenerationConfig,
    ) -> Result<Self> {
        let mut context = Self {
            id: id.into(),
            owner_id: owner_id.into(),
            initial_system_message: initial_system_message.clone(),
            messages: VecDeque::new(),
            archived: Vec::new(),
            status: ChatStatus::Active,
            token_usage: 0,
            config,
        };

        context.validate()?;
        context.add_message(initial_system_message)?;

        Ok(context)
    }

    /// Check identity, status and config fields without mutating anything
    pub fn validate(&self) -> Result<()> {
        if self.owner_id.is_empty() {
            return Err(ValidationError::EmptyOwner.into());
        }

        match self.status {
            ChatStatus::Active | ChatStatus::Ended => {}
        }

        self.config.validate()?;
        Ok(())
    }

    /// Append a message, evicting the oldest ones until it fits
    ///
    /// Returns how many messages were moved to the archive. On error the
    /// context is left exactly as it was.
    ///
    /// # Complexity
    /// O(k · n) for k evictions over n active messages
    pub fn add_message(&mut self, msg: M) -> Result<usize> {
        let next_status = self.status.transition(ChatEvent::MessageAdded)?;

        let max = self.config.model.max_tokens();
        let cost = msg.token_count();
        let evict = self.plan_eviction(cost, max)?;

        for _ in 0..evict {
            let Some(oldest) = self.messages.pop_front() else {
                break;
            };
            self.archived.push(oldest);
            self.refresh_token_usage();
        }

        self.messages.push_back(msg);
        self.refresh_token_usage();
        self.status = next_status;

        Ok(evict)
    }

    /// Number of front messages to drop so that `cost` fits under `max`
    fn plan_eviction(&self, cost: usize, max: usize) -> Result<usize> {
        if cost > max {
            return Err(ContextError::MessageExceedsBudget { tokens: cost, max });
        }

        let mut usage = self.token_usage;
        let mut evict = 0;
        for oldest in &self.messages {
            if fits(usage, cost, max) {
                break;
            }
            usage = usage.saturating_sub(oldest.token_count());
            evict += 1;
        }

        Ok(evict)
    }

    /// Active messages, oldest first
    pub fn messages(&self) -> &VecDeque<M> {
        &self.messages
    }

    /// Evicted messages, first evicted first
    pub fn archived_messages(&self) -> &[M] {
        &self.archived
    }

    pub fn count_messages(&self) -> usize {
        self.messages.len()
    }

    pub fn count_archived(&self) -> usize {
        self.archived.len()
    }

    /// Close the conversation; ending twice is a no-op
    pub fn end(&mut self) {
        if let Ok(next) = self.status.transition(ChatEvent::End) {
            self.status = next;
        }
    }

    /// Recompute usage from the active messages
    pub fn refresh_token_usage(&mut self) {
        self.token_usage = total_cost(&self.messages);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn initial_system_message(&self) -> &M {
        &self.initial_system_message
    }

    pub fn status(&self) -> ChatStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn token_usage(&self) -> usize {
        self.token_usage
    }

    /// Current budget reported by the model
    pub fn max_tokens(&self) -> usize {
        self.config.model.max_tokens()
    }

    /// Tokens still free before the next eviction
    pub fn remaining_tokens(&self) -> usize {
        self.max_tokens().saturating_sub(self.token_usage)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

/// `usage + cost <= max` without overflowing
fn fits(usage: usize, cost: usize, max: usize) -> bool {
    usage.checked_add(cost).is_some_and(|total| total <= max)
}

impl<M: TokenCost + Clone + Serialize> ConversationContext<M> {
    /// Serializable view of the current state
    pub fn snapshot(&self) -> ConversationSnapshot<M> {
        ConversationSnapshot {
            id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            status: self.status,
            model: self.config.model.name().to_string(),
            max_tokens: self.max_tokens(),
            token_usage: self.token_usage,
            messages: self.messages.iter().cloned().collect(),
            archived_messages: self.archived.clone(),
        }
    }
}

/// Point-in-time copy of a conversation
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot<M> {
    pub id: String,
    pub owner_id: String,
    pub status: ChatStatus,
    pub model: String,
    pub max_tokens: usize,
    pub token_usage: usize,
    pub messages: Vec<M>,
    pub archived_messages: Vec<M>,
}

impl<M: Serialize> ConversationSnapshot<M> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
