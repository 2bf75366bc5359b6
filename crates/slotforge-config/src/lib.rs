//! Configuration system for SlotForge.
//!
//! Load solver configuration from TOML or YAML files to pick the bound mode,
//! the rank weights and a time limit without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use slotforge_config::SolverConfig;
//! use slotforge_core::BoundMode;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     bound_mode = "at_least"
//!
//!     [cost]
//!     weights = [1, 3, 9, 27]
//!     forbid_unavailable = true
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.bound_mode, BoundMode::AtLeast);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(config.cost_model().unwrap().forbids_unavailable());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use slotforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("slotforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use slotforge_core::{BoundMode, CostModel, DEFAULT_WEIGHTS};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Capacity semantics shared by entities and persons.
    #[serde(default)]
    pub bound_mode: BoundMode,

    /// Whether the input carries per-entity and per-person counts.
    /// When false every capacity is 1.
    #[serde(default = "default_custom_counts")]
    pub custom_counts: bool,

    /// Rank weighting.
    #[serde(default)]
    pub cost: CostConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

fn default_custom_counts() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bound_mode: BoundMode::default(),
            custom_counts: default_custom_counts(),
            cost: CostConfig::default(),
            termination: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the bound mode.
    pub fn with_bound_mode(mut self, mode: BoundMode) -> Self {
        self.bound_mode = mode;
        self
    }

    /// Treats every capacity as 1.
    pub fn without_custom_counts(mut self) -> Self {
        self.custom_counts = false;
        self
    }

    /// Sets the weights of ranks 1 to 4.
    pub fn with_weights(mut self, weights: [u64; 4]) -> Self {
        self.cost.weights = weights;
        self
    }

    /// Makes rank 4 a hard exclusion.
    pub fn with_forbid_unavailable(mut self, forbid: bool) -> Self {
        self.cost.forbid_unavailable = forbid;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Builds the cost model described by the `[cost]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the weights are rejected.
    pub fn cost_model(&self) -> Result<CostModel, ConfigError> {
        self.cost.cost_model()
    }
}

/// Rank weighting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CostConfig {
    /// Costs of ranks 1, 2, 3 and 4.
    #[serde(default = "default_weights")]
    pub weights: [u64; 4],

    /// Never pair a person with an entity ranked 4.
    #[serde(default)]
    pub forbid_unavailable: bool,
}

fn default_weights() -> [u64; 4] {
    DEFAULT_WEIGHTS
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            forbid_unavailable: false,
        }
    }
}

impl CostConfig {
    pub fn cost_model(&self) -> Result<CostModel, ConfigError> {
        CostModel::new(self.weights)
            .map(|m| m.with_forbid_unavailable(self.forbid_unavailable))
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
