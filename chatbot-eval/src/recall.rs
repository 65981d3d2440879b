//! Recall: how much of what was expected the chatbot actually produced
//!
//! Call recall = matched names / expected calls (duplicates counted, ignored calls excluded)
//!
//! Argument recall is computed per matched name as the fraction of expected arguments
//! the chatbot supplied with a similar value, then averaged over matched names.

use crate::matching::{FunctionArgsMatch, FunctionCallMatch, MISSING_ARGUMENT};
use crate::scoring::{is_similar_with_threshold, mean, round2};

fn call_recall_raw(matched: &FunctionCallMatch) -> f64 {
    if matched.is_empty() || matched.expected_call_count == 0 {
        return 0.0;
    }

    matched.matched_calls.len() as f64 / matched.expected_call_count as f64
}

/// Call-level recall, rounded to two decimals
pub fn call_recall(matched: &FunctionCallMatch) -> f64 {
    round2(call_recall_raw(matched))
}

fn entry_recall(args: &FunctionArgsMatch, threshold: f64) -> f64 {
    if args.expected_args.is_empty() {
        return 1.0;
    }

    let correct = args
        .expected_args
        .iter()
        .filter(|(key, expected)| {
            let actual =
                args.actual_args.get(*key).map(String::as_str).unwrap_or(MISSING_ARGUMENT);
            is_similar_with_threshold(actual, expected, threshold)
        })
        .count();

    correct as f64 / args.expected_args.len() as f64
}

fn args_recall_raw(matched: &FunctionCallMatch, threshold: f64) -> f64 {
    mean(matched.matched_calls.values().map(|args| entry_recall(args, threshold))).unwrap_or(0.0)
}

/// Argument-level recall averaged over matched names, rounded to two decimals
pub fn args_recall(matched: &FunctionCallMatch, threshold: f64) -> f64 {
    round2(args_recall_raw(matched, threshold))
}
