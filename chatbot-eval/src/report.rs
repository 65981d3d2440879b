//! Evaluation result reporting
//!
//! Structures for representing, aggregating and persisting evaluation results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::schema::EvaluationInput;
use crate::scoring::mean;

/// File holding metrics and every scored row
pub const RESULTS_FILE: &str = "evaluation_results.json";
/// File holding metrics only
pub const METRICS_FILE: &str = "evaluation_metrics.json";

/// Complete report for one evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique identifier for this evaluation run
    pub run_id: String,
    /// Human-readable experiment name
    pub experiment_name: String,
    /// When the evaluation started
    pub started_at: chrono::DateTime<chrono::Utc>,
    /// When the evaluation completed
    pub completed_at: chrono::DateTime<chrono::Utc>,
    /// Mean score per evaluator, keyed `<alias>.score`
    pub metrics: BTreeMap<String, f64>,
    /// Scored rows, in dataset order
    pub rows: Vec<EvaluationRow>,
}

/// The metrics-only view written to [`METRICS_FILE`]
#[derive(Serialize)]
struct MetricsView<'a> {
    run_id: &'a str,
    experiment_name: &'a str,
    started_at: &'a chrono::DateTime<chrono::Utc>,
    completed_at: &'a chrono::DateTime<chrono::Utc>,
    metrics: &'a BTreeMap<String, f64>,
}

impl EvaluationReport {
    /// Create a report, aggregating `rows` over `aliases`
    pub fn new(
        run_id: &str,
        experiment_name: &str,
        aliases: &[String],
        rows: Vec<EvaluationRow>,
        started_at: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        let metrics = aggregate_metrics(aliases, &rows);

        Self {
            run_id: run_id.to_string(),
            experiment_name: experiment_name.to_string(),
            started_at,
            completed_at: chrono::Utc::now(),
            metrics,
            rows,
        }
    }

    /// Mean score of one evaluator
    pub fn metric(&self, alias: &str) -> Option<f64> {
        self.metrics.get(&metric_key(alias)).copied()
    }

    /// Rows that could not be scored
    pub fn errors(&self) -> Vec<&EvaluationRow> {
        self.rows.iter().filter(|r| r.evaluation_error.is_some()).collect()
    }

    /// Format as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Evaluation Report: {}\n", self.experiment_name));
        output.push_str(&format!("Run: {}\n", self.run_id));
        output.push_str(&format!("Rows: {}\n", self.rows.len()));

        if !self.metrics.is_empty() {
            output.push_str("\nMetrics:\n");
            for (metric, score) in &self.metrics {
                output.push_str(&format!("  {:<22} {:.2}\n", metric, score));
            }
        }

        let errors = self.errors();
        if !errors.is_empty() {
            output.push_str(&format!("\nRows not scored: {}\n", errors.len()));
            for row in errors {
                output.push_str(&format!(
                    "  - {}: {}\n",
                    row.input.case.scenario_type,
                    row.evaluation_error.as_deref().unwrap_or_default()
                ));
            }
        }

        output
    }

    /// Export to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write [`RESULTS_FILE`] and [`METRICS_FILE`] into `dir`, creating it if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        std::fs::write(dir.join(RESULTS_FILE), self.to_json()?)?;

        let view = MetricsView {
            run_id: &self.run_id,
            experiment_name: &self.experiment_name,
            started_at: &self.started_at,
            completed_at: &self.completed_at,
            metrics: &self.metrics,
        };
        std::fs::write(dir.join(METRICS_FILE), serde_json::to_string_pretty(&view)?)?;

        tracing::info!(dir = %dir.display(), "saved evaluation report");
        Ok(())
    }
}

/// One dataset row with its scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRow {
    /// The evaluated input
    #[serde(flatten)]
    pub input: EvaluationInput,
    /// Score per evaluator alias
    pub scores: BTreeMap<String, f64>,
    /// Why the row could not be scored, if it could not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_error: Option<String>,
}

/// Key under which an evaluator's mean score is reported
pub fn metric_key(alias: &str) -> String {
    format!("{}.score", alias)
}

/// Mean score per alias over `rows`. Every alias is present; an empty run scores 0.0.
pub fn aggregate_metrics(aliases: &[String], rows: &[EvaluationRow]) -> BTreeMap<String, f64> {
    aliases
        .iter()
        .map(|alias| {
            let mean = mean(rows.iter().filter_map(|r| r.scores.get(alias).copied()));
            (metric_key(alias), mean.unwrap_or(0.0))
        })
        .collect()
}

/// Unique experiment name: `<prefix>_<YYYY-MM-DD_HH-MM-SS-micros>`
pub fn generate_experiment_name(prefix: &str) -> String {
    format!("{}_{}", prefix, chrono::Local::now().format("%Y-%m-%d_%H-%M-%S-%6f"))
}
