//! Precision: how much of what the chatbot produced was correct
//!
//! Call precision = matched names / (matched names + unexpected actual calls)
//!
//! Argument precision is computed per matched name as the fraction of actual arguments
//! whose value is similar to the expected value, then averaged over matched names.

use crate::matching::{FunctionArgsMatch, FunctionCallMatch, MISSING_ARGUMENT};
use crate::scoring::{is_similar_with_threshold, mean, round2};

fn call_precision_raw(matched: &FunctionCallMatch) -> f64 {
    if matched.is_empty() || matched.expected_call_count == 0 {
        return 0.0;
    }

    let hits = matched.matched_calls.len();
    hits as f64 / (hits + matched.unmatched_actual_calls.len()) as f64
}

/// Call-level precision, rounded to two decimals
pub fn call_precision(matched: &FunctionCallMatch) -> f64 {
    round2(call_precision_raw(matched))
}

fn entry_precision(args: &FunctionArgsMatch, threshold: f64) -> f64 {
    if args.actual_args.is_empty() {
        return if args.expected_args.is_empty() { 1.0 } else { 0.0 };
    }

    let correct = args
        .actual_args
        .iter()
        .filter(|(key, actual)| {
            let expected =
                args.expected_args.get(*key).map(String::as_str).unwrap_or(MISSING_ARGUMENT);
            is_similar_with_threshold(actual, expected, threshold)
        })
        .count();

    correct as f64 / args.actual_args.len() as f64
}

fn args_precision_raw(matched: &FunctionCallMatch, threshold: f64) -> f64 {
    mean(matched.matched_calls.values().map(|args| entry_precision(args, threshold)))
        .unwrap_or(0.0)
}

/// Argument-level precision averaged over matched names, rounded to two decimals
pub fn args_precision(matched: &FunctionCallMatch, threshold: f64) -> f64 {
    round2(args_precision_raw(matched, threshold))
}
