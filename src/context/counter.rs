//! Token costing helpers
//!
//! The context never tokenizes text itself. Callers without a real tokenizer
//! can cost messages with this character heuristic.
//!
//! # Algorithm
//!
//! Base estimate: 1 token ≈ 4 characters, rounded up
//! Conservative: estimate × 1.10, rounded up

use crate::types::TokenCost;

/// Heuristic token counter
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCounter {
    conservative: bool,
}

impl TokenCounter {
    pub fn new() -> Self {
        Self { conservative: false }
    }

    /// Counter that adds a 10% safety margin to every estimate
    pub fn conservative() -> Self {
        Self { conservative: true }
    }

    /// Estimate token count for text
    ///
    /// ```
    /// # use chatwindow::context::counter::TokenCounter;
    /// let counter = TokenCounter::new();
    /// assert_eq!(counter.estimate(&"a".repeat(100)), 25);
    /// ```
    pub fn estimate(&self, text: &str) -> usize {
        let base = text.chars().count().div_ceil(4);
        if self.conservative {
            (base as f64 * 1.10).ceil() as usize
        } else {
            base
        }
    }
}

/// Sum the costs of a sequence of messages
///
/// Always recomputed from scratch; callers never adjust totals incrementally.
/// Saturates at `usize::MAX` instead of overflowing.
pub fn total_cost<'a, M, I>(messages: I) -> usize
where
    M: TokenCost + 'a,
    I: IntoIterator<Item = &'a M>,
{
    messages
        .into_iter()
        .map(TokenCost::token_count)
        .fold(0, usize::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl TokenCost for Fixed {
        fn token_count(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn test_basic_estimation() {
        let counter = TokenCounter::new();
        assert_eq!(counter.estimate(&"a".repeat(100)), 25);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(TokenCounter::new().estimate(""), 0);
    }

    #[test]
    fn test_ceiling_division() {
        let counter = TokenCounter::new();
        assert_eq!(counter.estimate("a"), 1);
        assert_eq!(counter.estimate("abcde"), 2);
    }

    #[test]
    fn test_unicode_counts_chars_not_bytes() {
        // 3 chars, 9 bytes
        assert_eq!(TokenCounter::new().estimate("日本語"), 1);
    }

    #[test]
    fn test_conservative_margin() {
        // 25 × 1.10 = 27.5 → 28
        let text = "a".repeat(100);
        assert_eq!(TokenCounter::conservative().estimate(&text), 28);
        assert!(TokenCounter::conservative().estimate(&text) >= TokenCounter::new().estimate(&text));
    }

    #[test]
    fn test_total_cost() {
        let items = vec![Fixed(3), Fixed(0), Fixed(7)];
        assert_eq!(total_cost(&items), 10);
        assert_eq!(total_cost::<Fixed, _>(&[]), 0);
    }

    #[test]
    fn test_total_cost_saturates() {
        let items = vec![Fixed(usize::MAX), Fixed(5)];
        assert_eq!(total_cost(&items), usize::MAX);
    }
}
