use anyhow::{Context, Result};
use chatbot_eval::{EvaluationDataset, EvaluationRunner, generate_experiment_name};
use std::path::Path;

use crate::config::load_match_config;

const EXPERIMENT_PREFIX: &str = "Support_Ticket_Chatbot_Eval";

pub fn run_evaluate(
    data_path: &Path,
    experiment_name: Option<String>,
    output_dir: &Path,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_match_config(config)?;
    let dataset = EvaluationDataset::load(data_path)
        .with_context(|| format!("failed to load dataset {}", data_path.display()))?;

    let experiment_name =
        experiment_name.unwrap_or_else(|| generate_experiment_name(EXPERIMENT_PREFIX));
    let output_path = output_dir.join(&experiment_name);

    let report = EvaluationRunner::with_config(&config).run(&experiment_name, &dataset);
    report
        .save(&output_path)
        .with_context(|| format!("failed to write report to {}", output_path.display()))?;

    print!("{}", report.format_summary());
    println!("{}", output_path.display());
    Ok(())
}
