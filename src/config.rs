//! TOML configuration for agents, the training schedule, and policy storage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{
    DISCOUNT, EXPLORATION_DECAY, EXPLORATION_RATE, LEARNING_RATE, MAX_INVALID_ATTEMPTS,
};
use crate::error::ConfigError;

/// Learning parameters shared by both self-play agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub learning_rate: f64,
    pub discount: f64,
    pub exploration_rate: f64,
    /// Seed for reproducible runs; each agent derives its own stream from it.
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            learning_rate: LEARNING_RATE,
            discount: DISCOUNT,
            exploration_rate: EXPLORATION_RATE,
            seed: None,
        }
    }
}

/// Self-play schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub num_games: usize,
    /// Save both policies whenever the game index is a multiple of this.
    pub save_every: usize,
    /// Decay exploration whenever the game index is a multiple of this.
    pub decay_every: usize,
    pub exploration_decay: f64,
    pub max_invalid_attempts: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            num_games: 100_000,
            save_every: 25_000,
            decay_every: 5_000,
            exploration_decay: EXPLORATION_DECAY,
            max_invalid_attempts: MAX_INVALID_ATTEMPTS,
        }
    }
}

impl TrainingConfig {
    /// Decay factor in (0, 1] and non-zero intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.exploration_decay > 0.0 && self.exploration_decay <= 1.0) {
            return Err(ConfigError::Validation(
                "training.exploration_decay must be in (0, 1]".into(),
            ));
        }
        if self.save_every == 0 {
            return Err(ConfigError::Validation(
                "training.save_every must be > 0".into(),
            ));
        }
        if self.decay_every == 0 {
            return Err(ConfigError::Validation(
                "training.decay_every must be > 0".into(),
            ));
        }
        if self.max_invalid_attempts == 0 {
            return Err(ConfigError::Validation(
                "training.max_invalid_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub dir: PathBuf,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            dir: PathBuf::from("policies"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub training: TrainingConfig,
    pub policy: PolicyConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &str, v: f64| {
            if v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Validation(format!("{name} must be in (0, 1]")))
            }
        };
        unit("agent.learning_rate", self.agent.learning_rate)?;
        unit("agent.discount", self.agent.discount)?;
        if !(0.0..=1.0).contains(&self.agent.exploration_rate) {
            return Err(ConfigError::Validation(
                "agent.exploration_rate must be in [0, 1]".into(),
            ));
        }
        self.training.validate()
    }

    /// The default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
