use anyhow::{Context, Result};
use chatbot_eval::{Evaluator, FunctionCall, FunctionCallEvaluator};
use serde_json::{Map, Value};
use std::path::Path;

use crate::config::load_match_config;

fn load_calls(path: &Path) -> Result<Vec<FunctionCall>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array", path.display()))?;
    FunctionCall::from_values(&records)
        .with_context(|| format!("malformed function call in {}", path.display()))
}

pub fn run_score(actual: &Path, expected: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_match_config(config)?;
    let actual = load_calls(actual)?;
    let expected = load_calls(expected)?;

    let scores: Map<String, Value> = FunctionCallEvaluator::all(&config)
        .iter()
        .map(|e| (e.name().to_string(), Value::from(e.evaluate(&actual, &expected))))
        .collect();

    tracing::debug!(actual = actual.len(), expected = expected.len(), "scored calls");
    println!("{}", serde_json::to_string_pretty(&scores)?);
    Ok(())
}
