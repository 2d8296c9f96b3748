//! Integration tests for chatwindow
//!
//! Exercises the public conversation API end to end, no tokenizer or model
//! service required.

use chatwindow::{
    ChatStatus, ContextError, ConversationContext, GenerationConfig, Message, ModelSpec,
    TokenCost, ValidationError,
};
use quickcheck_macros::quickcheck;

fn config(budget: usize) -> GenerationConfig {
    GenerationConfig::new(ModelSpec::new("test-model", budget).shared())
}

fn system(tokens: usize) -> Message {
    Message::system("You are a helpful assistant.", tokens).unwrap()
}

fn user(n: usize, tokens: usize) -> Message {
    Message::user(format!("message {}", n), tokens).unwrap()
}

#[test]
fn test_new_conversation_holds_system_message() {
    let context = ConversationContext::create("user-1", system(10), config(100)).unwrap();

    assert_eq!(context.token_usage(), 10);
    assert_eq!(context.count_messages(), 1);
    assert_eq!(context.messages()[0].id(), context.initial_system_message().id());
}

#[test]
fn test_eviction_moves_oldest_to_archive() {
    let mut context = ConversationContext::create("user-1", system(10), config(100)).unwrap();
    context.add_message(user(1, 45)).unwrap();
    context.add_message(user(2, 40)).unwrap();
    assert_eq!(context.token_usage(), 95);

    let first_id = context.messages()[0].id();
    context.add_message(user(3, 10)).unwrap();

    assert!(context.token_usage() <= 100);
    assert_eq!(context.archived_messages().len(), 1);
    assert_eq!(context.archived_messages()[0].id(), first_id);
    let expected: usize = context.messages().iter().map(|m| m.token_count()).sum();
    assert_eq!(context.token_usage(), expected);
}

#[test]
fn test_oversized_message_fails_without_eviction() {
    let mut context = ConversationContext::create("user-1", system(10), config(50)).unwrap();
    let before: Vec<_> = context.messages().iter().map(|m| m.id()).collect();

    let result = context.add_message(user(1, 60));

    assert!(matches!(
        result,
        Err(ContextError::MessageExceedsBudget { tokens: 60, max: 50 })
    ));
    let after: Vec<_> = context.messages().iter().map(|m| m.id()).collect();
    assert_eq!(before, after);
    assert!(context.archived_messages().is_empty());
    assert_eq!(context.token_usage(), 10);
}

#[test]
fn test_ended_conversation_rejects_messages() {
    let mut context = ConversationContext::create("user-1", system(10), config(100)).unwrap();
    context.add_message(user(1, 5)).unwrap();
    context.end();

    for n in 2..5 {
        assert!(matches!(
            context.add_message(user(n, 1)),
            Err(ContextError::ChatEnded)
        ));
    }

    assert_eq!(context.status(), ChatStatus::Ended);
    assert_eq!(context.count_messages(), 2);
    assert_eq!(context.token_usage(), 15);
}

#[test]
fn test_empty_owner_returns_no_context() {
    let result = ConversationContext::create("", system(10), config(100));
    assert!(matches!(
        result,
        Err(ContextError::Validation(ValidationError::EmptyOwner))
    ));
}

#[test]
fn test_out_of_range_penalty_rejected() {
    let result = ConversationContext::create(
        "user-1",
        system(10),
        config(100).with_presence_penalty(2.5),
    );
    assert!(matches!(
        result,
        Err(ContextError::Validation(
            ValidationError::PresencePenaltyOutOfRange(_)
        ))
    ));
}

#[test]
fn test_system_message_can_be_evicted() {
    let mut context = ConversationContext::create("user-1", system(10), config(30)).unwrap();
    context.add_message(user(1, 25)).unwrap();

    assert_eq!(context.archived_messages()[0].id(), context.initial_system_message().id());
    assert!(context
        .messages()
        .iter()
        .all(|m| m.id() != context.initial_system_message().id()));
}

// Property-based: arbitrary cost sequences against an arbitrary budget
#[quickcheck]
fn prop_window_invariants_hold(costs: Vec<u8>, budget: u8) -> bool {
    let budget = budget as usize;
    let mut context = ConversationContext::create("user-1", system(budget / 2), config(budget)).unwrap();
    let mut history = vec![context.initial_system_message().id()];

    for (n, cost) in costs.into_iter().enumerate() {
        let cost = cost as usize;
        let msg = user(n, cost);
        let id = msg.id();
        let usage_before = context.token_usage();
        let count_before = context.count_messages();

        match context.add_message(msg) {
            Ok(_) => history.push(id),
            Err(ContextError::MessageExceedsBudget { tokens, max }) => {
                if tokens != cost || max != budget || cost <= budget {
                    return false;
                }
                if context.token_usage() != usage_before || context.count_messages() != count_before {
                    return false;
                }
            }
            Err(_) => return false,
        }

        let sum: usize = context.messages().iter().map(|m| m.token_count()).sum();
        if context.token_usage() != sum || context.token_usage() > budget {
            return false;
        }
    }

    // archived followed by active is the full accepted history, in order
    let replayed: Vec<_> = context
        .archived_messages()
        .iter()
        .chain(context.messages().iter())
        .map(|m| m.id())
        .collect();
    replayed == history
}

#[test]
fn test_refresh_twice_matches_once() {
    let mut context = ConversationContext::create("user-1", system(10), config(100)).unwrap();
    context.add_message(user(1, 17)).unwrap();

    context.refresh_token_usage();
    let once = context.token_usage();
    context.refresh_token_usage();

    assert_eq!(context.token_usage(), once);
}

#[test]
fn test_context_can_move_across_threads() {
    let mut context = ConversationContext::create("user-1", system(10), config(100)).unwrap();

    let handle = std::thread::spawn(move || {
        context.add_message(user(1, 5)).unwrap();
        context
    });

    let context = handle.join().unwrap();
    assert_eq!(context.token_usage(), 15);
}
