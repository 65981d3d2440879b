//! Matching configuration
//!
//! Controls which function calls are excluded from scoring and how strictly
//! argument values are compared.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{EvalError, Result};

/// Housekeeping calls that never count toward precision or recall.
pub const DEFAULT_IGNORE_CALLS: [&str; 3] = [
    "CommonPlugin-summarize_ticket_details",
    "CommonPlugin-explain_workflow",
    "CommonPlugin-start_over",
];

/// Minimum similarity ratio for two argument values to be considered equal.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.95;

/// Configuration shared by the matcher and all function-call evaluators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Fully-qualified function names excluded from matching (case-insensitive)
    #[serde(default = "default_ignore_calls")]
    pub ignore_calls: Vec<String>,
    /// Similarity ratio (0.0 - 1.0) at which two argument values match
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            ignore_calls: default_ignore_calls(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl MatchConfig {
    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: MatchConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the ignore list
    pub fn with_ignore_calls<I, S>(mut self, calls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_calls = calls.into_iter().map(Into::into).collect();
        self
    }

    /// Set the argument similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Check that the config is usable
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(EvalError::ConfigError(format!(
                "similarity_threshold must be within [0.0, 1.0], got {}",
                self.similarity_threshold
            )));
        }
        if self.ignore_calls.iter().any(|name| name.trim().is_empty()) {
            return Err(EvalError::ConfigError(
                "ignore_calls must not contain empty names".to_string(),
            ));
        }
        Ok(())
    }

    /// Lower-cased ignore set used for lookups
    pub fn ignored_names(&self) -> HashSet<String> {
        self.ignore_calls.iter().map(|name| name.to_lowercase()).collect()
    }
}

fn default_ignore_calls() -> Vec<String> {
    DEFAULT_IGNORE_CALLS.iter().map(|name| name.to_string()).collect()
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}
