//! Configuration system for coursekb.
//!
//! Load recommender configuration from TOML or YAML files to tune relaxation
//! strategies, ranking weights and the popularity fallback without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use coursekb_config::{RecommenderConfig, StrategyType};
//! use coursekb_core::ConstraintKey;
//!
//! let config = RecommenderConfig::from_toml_str(r#"
//!     [ranking]
//!     top_n = 10
//!
//!     [[relaxation.strategies]]
//!     key = "minRating"
//!     type = "decrement"
//!     step = 0.25
//!     limit = 3.0
//!     max_attempts = 4
//! "#).unwrap();
//!
//! assert_eq!(config.ranking.top_n, 10);
//! let strategy = config.relaxation.strategy_for(ConstraintKey::MinRating).unwrap();
//! assert_eq!(strategy.kind, StrategyType::Decrement);
//! assert_eq!(strategy.step, 0.25);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use coursekb_config::RecommenderConfig;
//!
//! let config = RecommenderConfig::load("coursekb.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::HashSet;
use std::path::Path;

use coursekb_core::ConstraintKey;
use serde::{Deserialize, Serialize};
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

/// Main recommender configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecommenderConfig {
    /// Constraint relaxation configuration.
    #[serde(default)]
    pub relaxation: RelaxationConfig,

    /// Scoring and result-size configuration.
    #[serde(default)]
    pub ranking: RankingConfig,

    /// Popularity fallback used when relaxation finds nothing.
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl RecommenderConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
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

    /// Sets the maximum number of ranked results returned.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.ranking.top_n = top_n;
        self
    }

    /// Sets how many popular courses the terminal fallback considers.
    pub fn with_fallback_limit(mut self, limit: usize) -> Self {
        self.fallback.limit = limit;
        self
    }

    /// Sets the fallback relaxation order.
    pub fn with_order(mut self, order: Vec<ConstraintKey>) -> Self {
        self.relaxation.order = order;
        self
    }

    /// Adds a strategy, replacing any existing strategy for the same key.
    pub fn with_strategy(mut self, strategy: StrategyConfig) -> Self {
        self.relaxation.strategies.retain(|s| s.key != strategy.key);
        self.relaxation.strategies.push(strategy);
        self
    }

    /// Sets the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.ranking.weights = weights;
        self
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relaxation.validate()?;
        self.ranking.validate()
    }
}

/// Constraint relaxation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RelaxationConfig {
    /// Keys relaxed one at a time, in order, once conflict-guided
    /// relaxation has not produced results.
    pub order: Vec<ConstraintKey>,

    /// Per-key relaxation strategies. Keys without a strategy are never
    /// relaxed.
    pub strategies: Vec<StrategyConfig>,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            order: vec![
                ConstraintKey::MinRating,
                ConstraintKey::MaxPrice,
                ConstraintKey::MinDuration,
                ConstraintKey::Subcategory,
                ConstraintKey::Category,
                ConstraintKey::Language,
                ConstraintKey::IsPaid,
            ],
            strategies: vec![
                StrategyConfig::decrement(ConstraintKey::MinRating, 0.5, 0.0, 3),
                StrategyConfig::increment(ConstraintKey::MaxPrice, 100.0, None, 5),
                StrategyConfig::decrement(ConstraintKey::MinDuration, 10.0, 0.0, 3),
                StrategyConfig::remove(ConstraintKey::Language),
                StrategyConfig::remove(ConstraintKey::Category),
                StrategyConfig::remove(ConstraintKey::Subcategory),
                StrategyConfig::remove(ConstraintKey::IsPaid),
            ],
        }
    }
}

impl RelaxationConfig {
    /// Returns the strategy configured for `key`, if any.
    pub fn strategy_for(&self, key: ConstraintKey) -> Option<&StrategyConfig> {
        self.strategies.iter().find(|s| s.key == key)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for key in &self.order {
            if !seen.insert(*key) {
                return Err(ConfigError::Invalid(format!(
                    "relaxation order lists '{key}' more than once"
                )));
            }
        }

        let mut seen = HashSet::new();
        for strategy in &self.strategies {
            if !seen.insert(strategy.key) {
                return Err(ConfigError::Invalid(format!(
                    "more than one strategy for '{}'",
                    strategy.key
                )));
            }
            strategy.validate()?;
        }
        Ok(())
    }
}

/// Kind of relaxation applied to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Lower a minimum bound by `step`, floored at `limit` (default 0).
    Decrement,

    /// Raise a maximum bound by `step`, capped at `limit` (default none).
    Increment,

    /// Reset the key to its neutral value.
    Remove,
}

/// Relaxation strategy for one key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StrategyConfig {
    pub key: ConstraintKey,

    #[serde(rename = "type")]
    pub kind: StrategyType,

    /// Amount added or subtracted per attempt. Ignored for `remove`.
    #[serde(default)]
    pub step: f64,

    /// Floor for `decrement`, ceiling for `increment`.
    #[serde(default)]
    pub limit: Option<f64>,

    /// Attempts before moving on to the next key.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    1
}

impl StrategyConfig {
    pub fn decrement(key: ConstraintKey, step: f64, floor: f64, max_attempts: u32) -> Self {
        Self {
            key,
            kind: StrategyType::Decrement,
            step,
            limit: Some(floor),
            max_attempts,
        }
    }

    pub fn increment(
        key: ConstraintKey,
        step: f64,
        ceiling: Option<f64>,
        max_attempts: u32,
    ) -> Self {
        Self {
            key,
            kind: StrategyType::Increment,
            step,
            limit: ceiling,
            max_attempts,
        }
    }

    pub fn remove(key: ConstraintKey) -> Self {
        Self {
            key,
            kind: StrategyType::Remove,
            step: 0.0,
            limit: None,
            max_attempts: 1,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(format!("{}: {msg}", self.key)));

        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1");
        }
        if self.kind == StrategyType::Remove {
            return Ok(());
        }
        if !self.key.is_numeric() {
            return invalid("only numeric keys can be decremented or incremented");
        }
        match (self.kind, self.key.is_lower_bound()) {
            (StrategyType::Increment, true) => {
                return invalid("a lower bound can only be decremented");
            }
            (StrategyType::Decrement, false) => {
                return invalid("an upper bound can only be incremented");
            }
            _ => {}
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return invalid("step must be a positive number");
        }
        match self.limit {
            Some(limit) if limit.is_nan() || limit < 0.0 => invalid("limit must be non-negative"),
            _ => Ok(()),
        }
    }
}

/// Scoring and result-size configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RankingConfig {
    /// Maximum number of ranked results returned.
    pub top_n: usize,

    pub weights: ScoreWeights,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 30,
            weights: ScoreWeights::default(),
        }
    }
}

impl RankingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        self.weights.validate()
    }
}

/// Weights of the four score components. They sum to 100 so a score is a
/// percentage.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScoreWeights {
    pub rating: f64,
    pub popularity: f64,
    pub reviews: f64,
    pub content: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating: 40.0,
            popularity: 30.0,
            reviews: 20.0,
            content: 10.0,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.rating + self.popularity + self.reviews + self.content
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let parts = [self.rating, self.popularity, self.reviews, self.content];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid(
                "score weights must be non-negative".into(),
            ));
        }
        if (self.total() - 100.0).abs() > 1e-9 {
            return Err(ConfigError::Invalid(format!(
                "score weights must sum to 100, got {}",
                self.total()
            )));
        }
        Ok(())
    }
}

/// Popularity fallback configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FallbackConfig {
    /// Number of most-subscribed courses considered before ranking.
    pub limit: usize,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { limit: 50 }
    }
}
