//! Evaluator contract and the function-call evaluators
//!
//! Every evaluator takes the actual and expected calls of one conversation and returns a
//! single score. [`Evaluator::call`] accepts plain JSON records; [`Evaluator::evaluate`]
//! works on parsed [`FunctionCall`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::criteria::MatchConfig;
use crate::error::Result;
use crate::matching::match_function_calls_with_config;
use crate::precision::{args_precision, call_precision};
use crate::recall::{args_recall, call_recall};
use crate::reliability::reliability;
use crate::schema::FunctionCall;

/// Output of a single evaluator invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorResult {
    /// Score between 0.0 and 1.0
    pub score: f64,
}

/// Common interface of all scorers
pub trait Evaluator: Send + Sync {
    /// Name the score is reported under
    fn name(&self) -> &str;

    /// Score parsed calls
    fn evaluate(&self, actual: &[FunctionCall], expected: &[FunctionCall]) -> f64;

    /// Score plain `{"functionName": ..., "arguments": {...}}` records
    fn call(
        &self,
        actual_function_calls: &[Value],
        expected_function_calls: &[Value],
    ) -> Result<EvaluatorResult> {
        let actual = FunctionCall::from_values(actual_function_calls)?;
        let expected = FunctionCall::from_values(expected_function_calls)?;
        Ok(EvaluatorResult { score: self.evaluate(&actual, &expected) })
    }
}

/// The function-call metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionCallMetric {
    /// Matched names over all non-ignored actual calls
    CallPrecision,
    /// Correct actual arguments per matched name
    ArgsPrecision,
    /// Matched names over all non-ignored expected calls
    CallRecall,
    /// Correct expected arguments per matched name
    ArgsRecall,
    /// Average of call and argument recall
    Reliability,
}

impl FunctionCallMetric {
    /// All metrics, in report order
    pub const ALL: [FunctionCallMetric; 5] = [
        FunctionCallMetric::CallPrecision,
        FunctionCallMetric::CallRecall,
        FunctionCallMetric::ArgsPrecision,
        FunctionCallMetric::ArgsRecall,
        FunctionCallMetric::Reliability,
    ];

    /// Column name used in reports
    pub fn alias(&self) -> &'static str {
        match self {
            FunctionCallMetric::CallPrecision => "Precision_fn",
            FunctionCallMetric::CallRecall => "Recall_fn",
            FunctionCallMetric::ArgsPrecision => "Precision_args",
            FunctionCallMetric::ArgsRecall => "Recall_args",
            FunctionCallMetric::Reliability => "Reliability",
        }
    }
}

/// Scores one [`FunctionCallMetric`] under a [`MatchConfig`]
#[derive(Debug, Clone)]
pub struct FunctionCallEvaluator {
    metric: FunctionCallMetric,
    config: MatchConfig,
}

impl FunctionCallEvaluator {
    /// Create an evaluator with the default config
    pub fn new(metric: FunctionCallMetric) -> Self {
        Self { metric, config: MatchConfig::default() }
    }

    /// Create with custom config
    pub fn with_config(metric: FunctionCallMetric, config: MatchConfig) -> Self {
        Self { metric, config }
    }

    /// One evaluator per metric, sharing `config`
    pub fn all(config: &MatchConfig) -> Vec<Self> {
        FunctionCallMetric::ALL.iter().map(|m| Self::with_config(*m, config.clone())).collect()
    }

    /// The metric this evaluator computes
    pub fn metric(&self) -> FunctionCallMetric {
        self.metric
    }

    /// The matching config in use
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }
}

impl Evaluator for FunctionCallEvaluator {
    fn name(&self) -> &str {
        self.metric.alias()
    }

    fn evaluate(&self, actual: &[FunctionCall], expected: &[FunctionCall]) -> f64 {
        let matched = match_function_calls_with_config(actual, expected, &self.config);
        let threshold = self.config.similarity_threshold;

        match self.metric {
            FunctionCallMetric::CallPrecision => call_precision(&matched),
            FunctionCallMetric::ArgsPrecision => args_precision(&matched, threshold),
            FunctionCallMetric::CallRecall => call_recall(&matched),
            FunctionCallMetric::ArgsRecall => args_recall(&matched, threshold),
            FunctionCallMetric::Reliability => reliability(&matched, threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aliases_are_unique() {
        let mut aliases: Vec<_> = FunctionCallMetric::ALL.iter().map(|m| m.alias()).collect();
        aliases.sort();
        aliases.dedup();
        assert_eq!(aliases.len(), FunctionCallMetric::ALL.len());
    }

    #[test]
    fn test_call_parses_records() {
        let record = json!({
            "functionName": "TicketManagementPlugin-create_support_ticket",
            "arguments": {"title": "A"}
        });
        let evaluator = FunctionCallEvaluator::new(FunctionCallMetric::ArgsPrecision);

        let result = evaluator.call(&[record.clone()], &[record]).unwrap();
        assert_eq!(result, EvaluatorResult { score: 1.0 });
    }

    #[test]
    fn test_call_rejects_malformed_records() {
        let evaluator = FunctionCallEvaluator::new(FunctionCallMetric::CallRecall);
        let bad = json!({"name": "TicketManagementPlugin-create_support_ticket"});

        assert!(evaluator.call(&[bad], &[]).is_err());
    }

    #[test]
    fn test_all_uses_shared_config() {
        let config = MatchConfig::default().with_similarity_threshold(0.5);
        let evaluators = FunctionCallEvaluator::all(&config);

        assert_eq!(evaluators.len(), 5);
        assert!(evaluators.iter().all(|e| e.config() == &config));
        assert_eq!(evaluators[0].name(), "Precision_fn");
    }
}
