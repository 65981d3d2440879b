use anyhow::{Context, Result};
use chatbot_eval::MatchConfig;
use std::path::Path;

/// Matching config from `path`, or the defaults when no file is given
pub fn load_match_config(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(MatchConfig::default()),
    }
}
