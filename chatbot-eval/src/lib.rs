//! # chatbot-eval
//!
//! Function-call evaluation for support-ticket chatbots.
//!
//! This crate compares the function calls a chatbot made during a conversation with
//! the calls a ground-truth scenario expected, and scores the difference.
//!
//! ## Features
//!
//! - **Matching**: Case-insensitive pairing of actual and expected calls by name
//! - **Fuzzy Arguments**: Argument values compared with a similarity ratio after normalization
//! - **Metrics**: Call and argument precision, call and argument recall, reliability
//! - **Ignore List**: Housekeeping calls excluded from scoring on both sides
//! - **Harness**: Score whole datasets and persist results and aggregate metrics
//!
//! ## Quick Start
//!
//! ```rust
//! use chatbot_eval::prelude::*;
//!
//! let expected = vec![
//!     FunctionCall::new("TicketManagementPlugin-create_support_ticket")
//!         .with_arg("title", "Printer not working")
//!         .with_arg("priority", "Low"),
//! ];
//! let actual = vec![
//!     FunctionCall::new("ticketmanagementplugin-create_support_ticket")
//!         .with_arg("title", "printer not working!")
//!         .with_arg("priority", "Low"),
//!     FunctionCall::new("CommonPlugin-start_over"),
//! ];
//!
//! let matched = match_function_calls(&actual, &expected);
//! assert_eq!(call_precision(&matched), 1.0);
//! assert_eq!(args_recall(&matched, DEFAULT_SIMILARITY_THRESHOLD), 1.0);
//!
//! let evaluator = FunctionCallEvaluator::new(FunctionCallMetric::Reliability);
//! assert_eq!(evaluator.evaluate(&actual, &expected), 1.0);
//! ```

pub mod criteria;
pub mod error;
pub mod evaluator;
pub mod matching;
pub mod precision;
pub mod recall;
pub mod reliability;
pub mod report;
pub mod runner;
pub mod schema;
pub mod scoring;

// Re-exports
pub use criteria::{DEFAULT_IGNORE_CALLS, DEFAULT_SIMILARITY_THRESHOLD, MatchConfig};
pub use error::{EvalError, Result};
pub use evaluator::{Evaluator, EvaluatorResult, FunctionCallEvaluator, FunctionCallMetric};
pub use matching::{
    FunctionArgsMatch, FunctionCallMatch, MISSING_ARGUMENT, match_function_calls,
    match_function_calls_with_config,
};
pub use precision::{args_precision, call_precision};
pub use recall::{args_recall, call_recall};
pub use reliability::reliability;
pub use report::{EvaluationReport, EvaluationRow, generate_experiment_name};
pub use runner::EvaluationRunner;
pub use schema::{EvaluationDataset, EvaluationInput, FunctionCall, GroundTruthCase, RawToolCall};
pub use scoring::{is_similar, is_similar_with_threshold, normalize, similarity_ratio};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::criteria::{DEFAULT_SIMILARITY_THRESHOLD, MatchConfig};
    pub use crate::error::{EvalError, Result};
    pub use crate::evaluator::{
        Evaluator, EvaluatorResult, FunctionCallEvaluator, FunctionCallMetric,
    };
    pub use crate::matching::{FunctionCallMatch, match_function_calls};
    pub use crate::precision::{args_precision, call_precision};
    pub use crate::recall::{args_recall, call_recall};
    pub use crate::reliability::reliability;
    pub use crate::report::EvaluationReport;
    pub use crate::runner::EvaluationRunner;
    pub use crate::schema::{EvaluationDataset, FunctionCall, GroundTruthCase};
}
