//! Transcript replay
//!
//! Drives a `ConversationContext` from a JSON-lines file so the eviction
//! behaviour of a given budget can be inspected offline.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::cli::args::ReplayArgs;
use crate::cli::config::Config;
use crate::context::{ConversationContext, TokenCounter};
use crate::errors::{ContextError, Result};
use crate::types::{Message, Role, TokenCost};

/// One line of a transcript file
#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    role: Role,
    content: String,
    #[serde(default)]
    tokens: Option<usize>,
}

/// Outcome of a single replayed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Added { evicted: usize, usage: usize },
    Rejected { reason: String },
}

/// Summary of a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub turns: Vec<TurnOutcome>,
}

impl ReplayReport {
    pub fn accepted(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, TurnOutcome::Added { .. }))
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.turns.len() - self.accepted()
    }

    pub fn total_evicted(&self) -> usize {
        self.turns
            .iter()
            .map(|t| match t {
                TurnOutcome::Added { evicted, .. } => *evicted,
                TurnOutcome::Rejected { .. } => 0,
            })
            .sum()
    }
}

/// Parse a JSON-lines transcript; blank lines are skipped
pub fn parse_transcript(text: &str, counter: &TokenCounter) -> Result<Vec<Message>> {
    let mut messages = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let entry: TranscriptEntry =
            serde_json::from_str(line).map_err(|e| ContextError::Transcript {
                line: index + 1,
                reason: e.to_string(),
            })?;

        let message = match entry.tokens {
            Some(tokens) => Message::new(entry.role, entry.content, tokens),
            None => Message::estimated(entry.role, entry.content, counter),
        }
        .map_err(|e| ContextError::Transcript {
            line: index + 1,
            reason: e.to_string(),
        })?;

        messages.push(message);
    }

    Ok(messages)
}

pub fn load_transcript(path: &Path, counter: &TokenCounter) -> Result<Vec<Message>> {
    let text = std::fs::read_to_string(path)?;
    parse_transcript(&text, counter)
}

/// Apply command-line overrides on top of the loaded config
pub fn effective_config(base: &Config, args: &ReplayArgs) -> Result<Config> {
    let mut config = base.clone();

    if let Some(max_tokens) = args.max_tokens {
        config.model.max_tokens = max_tokens;
    }
    if let Some(owner) = &args.owner {
        config.session.owner_id = owner.clone();
    }
    if let Some(system) = &args.system {
        config.session.system_prompt = system.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Open a conversation seeded with the configured system prompt
pub fn start_conversation(config: &Config, counter: &TokenCounter) -> Result<ConversationContext> {
    let system = Message::estimated(Role::System, config.session.system_prompt.clone(), counter)?;
    ConversationContext::create(
        config.session.owner_id.clone(),
        system,
        config.generation_config(),
    )
}

/// Add every message in order; oversized turns are recorded and skipped
pub fn replay(context: &mut ConversationContext, messages: Vec<Message>) -> ReplayReport {
    let mut report = ReplayReport::default();

    for (turn, message) in messages.into_iter().enumerate() {
        let role = message.role();
        let tokens = message.token_count();
        let archived_before = context.count_archived();

        let outcome = match context.add_message(message) {
            Ok(evicted) => {
                for dropped in &context.archived_messages()[archived_before..] {
                    debug!(
                        turn,
                        role = %dropped.role(),
                        tokens = dropped.token_count(),
                        "evicted message"
                    );
                }
                info!(
                    turn,
                    %role,
                    tokens,
                    evicted,
                    usage = context.token_usage(),
                    "message added"
                );
                TurnOutcome::Added {
                    evicted,
                    usage: context.token_usage(),
                }
            }
            Err(e) => {
                warn!(turn, %role, tokens, error = %e, "message rejected");
                TurnOutcome::Rejected {
                    reason: e.to_string(),
                }
            }
        };

        report.turns.push(outcome);
    }

    report
}
