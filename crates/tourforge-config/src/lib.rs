//! Configuration system for TourForge.
//!
//! Load GRASP configuration from TOML or YAML files to control the random
//! seed, iteration budget, stopping criteria and local search tolerance
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tourforge_config::{DistanceCalculation, GraspConfig};
//! use std::time::Duration;
//!
//! let config = GraspConfig::from_toml_str(r#"
//!     random_seed = 7
//!     distance_calculation = "matrix"
//!
//!     [termination]
//!     iteration_count_limit = 50
//!     unimproved_iteration_count_limit = 10
//!     seconds_spent_limit = 30
//!
//!     [local_search]
//!     improvement_epsilon = 1e-9
//! "#).unwrap();
//!
//! assert_eq!(config.max_iterations(), 50);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.distance_calculation, DistanceCalculation::Matrix);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tourforge_config::GraspConfig;
//!
//! let config = GraspConfig::load("tourforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Iteration budget used when no `iteration_count_limit` is configured.
pub const DEFAULT_MAX_ITERATIONS: u64 = 100;

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

/// Main GRASP configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GraspConfig {
    /// Random seed for reproducible start city selection.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// How distances are obtained during solving.
    #[serde(default)]
    pub distance_calculation: DistanceCalculation,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Local search configuration.
    #[serde(default)]
    pub local_search: Option<LocalSearchConfig>,
}

impl GraspConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails [`GraspConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the number of GRASP iterations.
    pub fn with_iteration_count_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            iteration_count_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Stops after `limit` consecutive iterations without a better tour.
    pub fn with_unimproved_iteration_count_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            unimproved_iteration_count_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
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

    /// Sets the minimum improvement a 2-opt move must achieve.
    pub fn with_improvement_epsilon(mut self, epsilon: f64) -> Self {
        self.local_search = Some(LocalSearchConfig {
            improvement_epsilon: epsilon,
        });
        self
    }

    /// Sets how distances are computed.
    pub fn with_distance_calculation(mut self, calculation: DistanceCalculation) -> Self {
        self.distance_calculation = calculation;
        self
    }

    /// Returns the configured iteration budget, or [`DEFAULT_MAX_ITERATIONS`].
    pub fn max_iterations(&self) -> u64 {
        self.termination
            .as_ref()
            .and_then(|t| t.iteration_count_limit)
            .unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the unimproved iteration limit, if configured.
    pub fn unimproved_iteration_count_limit(&self) -> Option<u64> {
        self.termination
            .as_ref()
            .and_then(|t| t.unimproved_iteration_count_limit)
    }

    /// Returns the local search improvement epsilon (0.0 when unset).
    pub fn improvement_epsilon(&self) -> f64 {
        self.local_search
            .as_ref()
            .map(|ls| ls.improvement_epsilon)
            .unwrap_or(0.0)
    }

    /// Checks values that parse but cannot drive a solver.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero iteration or unimproved
    /// iteration limit, or a negative or non-finite improvement epsilon.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(termination) = &self.termination {
            if termination.iteration_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "iteration_count_limit must be at least 1".to_string(),
                ));
            }
            if termination.unimproved_iteration_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "unimproved_iteration_count_limit must be at least 1".to_string(),
                ));
            }
        }

        let epsilon = self.improvement_epsilon();
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "improvement_epsilon must be a finite non-negative number, got {epsilon}"
            )));
        }

        Ok(())
    }
}

/// Source of city-to-city distances during solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceCalculation {
    /// Recompute every distance from coordinates.
    #[default]
    Direct,

    /// Precompute all pairwise distances once per run.
    Matrix,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Number of GRASP iterations to run.
    pub iteration_count_limit: Option<u64>,

    /// Maximum consecutive iterations without a better incumbent.
    pub unimproved_iteration_count_limit: Option<u64>,

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

/// 2-opt local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// A move is accepted only if it shortens the tour by more than this.
    #[serde(default)]
    pub improvement_epsilon: f64,
}
