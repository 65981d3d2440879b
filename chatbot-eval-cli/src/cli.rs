use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatbot-eval", version)]
#[command(about = "Score the function calls of a support-ticket chatbot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every row of a dataset and write the report files
    Evaluate {
        /// Dataset JSON file (ground-truth cases with the calls the chatbot made)
        #[arg(short, long)]
        data_path: PathBuf,

        /// Experiment name, generated from the current time when omitted
        #[arg(short, long)]
        experiment_name: Option<String>,

        /// Directory the experiment folder is created in
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// TOML matching config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Score one list of actual calls against one list of expected calls
    Score {
        /// JSON file with the calls the chatbot made
        #[arg(short, long)]
        actual: PathBuf,

        /// JSON file with the calls that were expected
        #[arg(short, long)]
        expected: PathBuf,

        /// TOML matching config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
