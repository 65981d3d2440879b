//! Evaluation runner
//!
//! Runs a set of named evaluators over every row of a dataset and aggregates the results
//! into an [`EvaluationReport`].

use std::collections::BTreeMap;

use crate::criteria::MatchConfig;
use crate::evaluator::{Evaluator, FunctionCallEvaluator};
use crate::report::{EvaluationReport, EvaluationRow};
use crate::schema::{EvaluationDataset, EvaluationInput, FunctionCall};

/// Runs evaluators over datasets
pub struct EvaluationRunner {
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl EvaluationRunner {
    /// Create a runner with no evaluators
    pub fn new() -> Self {
        Self { evaluators: Vec::new() }
    }

    /// Create a runner with every function-call metric under `config`
    pub fn with_config(config: &MatchConfig) -> Self {
        FunctionCallEvaluator::all(config)
            .into_iter()
            .fold(Self::new(), |runner, evaluator| runner.evaluator(evaluator))
    }

    /// Add an evaluator. Its [`Evaluator::name`] becomes the score column.
    pub fn evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluators.push(Box::new(evaluator));
        self
    }

    /// Score columns, in registration order
    pub fn aliases(&self) -> Vec<String> {
        self.evaluators.iter().map(|e| e.name().to_string()).collect()
    }

    /// Score a single row.
    ///
    /// Malformed actual records do not abort the run: the row scores 0.0 on every
    /// evaluator and carries the parse error.
    pub fn evaluate_row(&self, input: &EvaluationInput) -> EvaluationRow {
        let expected = &input.case.expected_function_calls;

        let (scores, evaluation_error) = match FunctionCall::from_values(&input.function_calls) {
            Ok(actual) => {
                let scores: BTreeMap<String, f64> = self
                    .evaluators
                    .iter()
                    .map(|e| (e.name().to_string(), e.evaluate(&actual, expected)))
                    .collect();
                (scores, None)
            }
            Err(e) => {
                tracing::warn!(
                    scenario = %input.case.scenario_type,
                    error = %e,
                    "skipping row with malformed function calls"
                );
                let scores: BTreeMap<String, f64> =
                    self.aliases().into_iter().map(|alias| (alias, 0.0)).collect();
                (scores, Some(e.to_string()))
            }
        };

        tracing::debug!(
            scenario = %input.case.scenario_type,
            actual = input.function_calls.len(),
            expected = expected.len(),
            ?scores,
            "scored row"
        );

        EvaluationRow { input: input.clone(), scores, evaluation_error }
    }

    /// Score every row of `dataset`
    pub fn run(&self, experiment_name: &str, dataset: &EvaluationDataset) -> EvaluationReport {
        let started_at = chrono::Utc::now();
        let run_id = format!("{}_{}", experiment_name, uuid::Uuid::new_v4());

        tracing::info!(
            experiment = experiment_name,
            rows = dataset.len(),
            evaluators = self.evaluators.len(),
            "starting evaluation"
        );

        let rows: Vec<EvaluationRow> =
            dataset.rows.iter().map(|row| self.evaluate_row(row)).collect();
        let report =
            EvaluationReport::new(&run_id, experiment_name, &self.aliases(), rows, started_at);

        tracing::info!(
            experiment = experiment_name,
            errors = report.errors().len(),
            metrics = ?report.metrics,
            "evaluation complete"
        );

        report
    }
}

impl Default for EvaluationRunner {
    fn default() -> Self {
        Self::with_config(&MatchConfig::default())
    }
}
