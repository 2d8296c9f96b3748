//! Configuration management for chatwindow
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.chatwindow/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ContextError, Result};
use crate::types::generation::validate_sampling;
use crate::types::{GenerationConfig, ModelSpec};

/// Complete configuration for chatwindow
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Model the conversation targets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub max_tokens: usize,
}

/// Sampling parameters, mirrored into `GenerationConfig`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub candidate_count: usize,
    pub stop_sequences: Vec<String>,
    pub max_output_tokens: usize,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

/// Defaults for new conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub owner_id: String,
    pub system_prompt: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gpt-3.5-turbo".to_string(),
            max_tokens: 4096,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
            candidate_count: 1,
            stop_sequences: Vec::new(),
            max_output_tokens: 1024,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            owner_id: "local".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ContextError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ContextError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from ~/.chatwindow/config.toml if present, else built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".chatwindow").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.model.max_tokens == 0 {
            return Err(ContextError::ConfigError(
                "model.max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.session.owner_id.is_empty() {
            return Err(ContextError::ConfigError(
                "session.owner_id must not be empty".to_string(),
            ));
        }

        let g = &self.generation;
        validate_sampling(g.temperature, g.top_p, g.presence_penalty, g.frequency_penalty)?;

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ContextError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Model described by the `[model]` section
    pub fn model_spec(&self) -> ModelSpec {
        ModelSpec::new(self.model.name.clone(), self.model.max_tokens)
    }

    /// Generation settings bound to the configured model
    pub fn generation_config(&self) -> GenerationConfig {
        let g = &self.generation;
        GenerationConfig::new(self.model_spec().shared())
            .with_temperature(g.temperature)
            .with_top_p(g.top_p)
            .with_candidate_count(g.candidate_count)
            .with_stop_sequences(g.stop_sequences.iter().cloned())
            .with_max_output_tokens(g.max_output_tokens)
            .with_presence_penalty(g.presence_penalty)
            .with_frequency_penalty(g.frequency_penalty)
    }
}
