//! Generation settings attached to a conversation
//!
//! Built by value with the `with_*` setters, then handed to the context,
//! which only ever exposes it by shared reference.

use std::ops::RangeInclusive;

use crate::errors::ValidationError;
use crate::types::model::SharedModel;

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const TOP_P_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const PENALTY_RANGE: RangeInclusive<f32> = -2.0..=2.0;

/// Sampling parameters plus the model they target
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model the conversation is sent to (shared, not owned)
    pub model: SharedModel,

    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,

    /// Nucleus sampling mass (0.0 - 1.0)
    pub top_p: f32,

    /// Number of completions to request
    pub candidate_count: usize,

    /// Sequences that end generation
    pub stop_sequences: Vec<String>,

    /// Upper bound on generated tokens (not the input budget)
    pub max_output_tokens: usize,

    /// -2.0 - 2.0
    pub presence_penalty: f32,

    /// -2.0 - 2.0
    pub frequency_penalty: f32,
}

impl GenerationConfig {
    /// Create config with default sampling parameters
    pub fn new(model: SharedModel) -> Self {
        Self {
            model,
            temperature: 1.0,
            top_p: 1.0,
            candidate_count: 1,
            stop_sequences: Vec::new(),
            max_output_tokens: 1024,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_candidate_count(mut self, candidate_count: usize) -> Self {
        self.candidate_count = candidate_count;
        self
    }

    pub fn with_stop_sequences<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_sequences = stops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = penalty;
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = penalty;
        self
    }

    /// Check every bounded field; NaN is always out of range
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_sampling(
            self.temperature,
            self.top_p,
            self.presence_penalty,
            self.frequency_penalty,
        )
    }
}

/// Range checks shared with the config file loader
pub fn validate_sampling(
    temperature: f32,
    top_p: f32,
    presence_penalty: f32,
    frequency_penalty: f32,
) -> std::result::Result<(), ValidationError> {
    if !TEMPERATURE_RANGE.contains(&temperature) {
        return Err(ValidationError::TemperatureOutOfRange(temperature));
    }
    if !TOP_P_RANGE.contains(&top_p) {
        return Err(ValidationError::TopPOutOfRange(top_p));
    }
    if !PENALTY_RANGE.contains(&presence_penalty) {
        return Err(ValidationError::PresencePenaltyOutOfRange(presence_penalty));
    }
    if !PENALTY_RANGE.contains(&frequency_penalty) {
        return Err(ValidationError::FrequencyPenaltyOutOfRange(frequency_penalty));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::model::ModelSpec;

    fn config() -> GenerationConfig {
        GenerationConfig::new(ModelSpec::new("test", 100).shared())
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_temperature_bounds_inclusive() {
        assert!(config().with_temperature(0.0).validate().is_ok());
        assert!(config().with_temperature(2.0).validate().is_ok());
        assert_eq!(
            config().with_temperature(2.01).validate(),
            Err(ValidationError::TemperatureOutOfRange(2.01))
        );
        assert!(config().with_temperature(-0.1).validate().is_err());
    }

    #[test]
    fn test_nan_temperature_rejected() {
        assert!(matches!(
            config().with_temperature(f32::NAN).validate(),
            Err(ValidationError::TemperatureOutOfRange(_))
        ));
    }

    #[test]
    fn test_top_p_bounds() {
        assert!(config().with_top_p(1.0).validate().is_ok());
        assert_eq!(
            config().with_top_p(1.5).validate(),
            Err(ValidationError::TopPOutOfRange(1.5))
        );
    }

    #[test]
    fn test_penalty_bounds() {
        assert!(config()
            .with_presence_penalty(-2.0)
            .with_frequency_penalty(2.0)
            .validate()
            .is_ok());
        assert_eq!(
            config().with_presence_penalty(-2.5).validate(),
            Err(ValidationError::PresencePenaltyOutOfRange(-2.5))
        );
        assert_eq!(
            config().with_frequency_penalty(3.0).validate(),
            Err(ValidationError::FrequencyPenaltyOutOfRange(3.0))
        );
    }

    #[test]
    fn test_builder_setters() {
        let cfg = config()
            .with_candidate_count(3)
            .with_stop_sequences(["\n\n", "END"])
            .with_max_output_tokens(256);
        assert_eq!(cfg.candidate_count, 3);
        assert_eq!(cfg.stop_sequences, vec!["\n\n".to_string(), "END".to_string()]);
        assert_eq!(cfg.max_output_tokens, 256);
    }
}
