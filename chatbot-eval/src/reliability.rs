//! Reliability: a single recall-based signal
//!
//! Reliability = (call recall + argument recall) / 2
//!
//! Both recall scores are the rounded public scores; their average is not rounded again.

use crate::matching::FunctionCallMatch;
use crate::recall::{args_recall, call_recall};

/// Mean of call-level and argument-level recall
pub fn reliability(matched: &FunctionCallMatch, threshold: f64) -> f64 {
    (call_recall(matched) + args_recall(matched, threshold)) / 2.0
}
