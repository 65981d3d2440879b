mod cli;
mod config;
mod evaluate;
mod score;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Evaluate { data_path, experiment_name, output_dir, config } => {
            evaluate::run_evaluate(&data_path, experiment_name, &output_dir, config.as_deref())
        }
        Commands::Score { actual, expected, config } => {
            score::run_score(&actual, &expected, config.as_deref())
        }
    }
}
