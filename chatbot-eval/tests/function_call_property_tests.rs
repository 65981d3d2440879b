//! Property-based tests for function-call matching and scoring.
//!
//! *For any* lists of function calls, the matcher and the evaluators SHALL:
//! - score identical lists of distinct calls 1.0 on every metric
//! - score lists with disjoint names 0.0 on call precision and call recall
//! - report matched and unmatched names whose counts recover call precision
//! - ignore repetition of an already matched actual call
//! - never surface an ignored name in matched or unmatched results

use std::collections::HashSet;

use chatbot_eval::criteria::DEFAULT_IGNORE_CALLS;
use chatbot_eval::scoring::round2;
use chatbot_eval::{
    Evaluator, FunctionCall, FunctionCallEvaluator, FunctionCallMetric, match_function_calls,
};
use proptest::prelude::*;

/// Generator for plugin-qualified function names: `Plugin-function`, never an ignored name
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{2,10}Plugin-[a-z][a-z_]{2,15}".prop_filter("ignored name", |name| {
        !DEFAULT_IGNORE_CALLS.iter().any(|ignored| ignored.eq_ignore_ascii_case(name))
    })
}

/// Generator for argument maps with short alphanumeric values
fn arb_args() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z_]{1,10}", "[A-Za-z0-9 ]{0,20}"), 0..5)
}

fn arb_call() -> impl Strategy<Value = FunctionCall> {
    (arb_name(), arb_args()).prop_map(|(name, args)| FunctionCall::new(name).with_args(args))
}

/// Generator for call lists whose names are distinct ignoring case
fn arb_distinct_calls(max: usize) -> impl Strategy<Value = Vec<FunctionCall>> {
    prop::collection::vec(arb_call(), 1..max).prop_map(|calls| {
        let mut seen = HashSet::new();
        calls.into_iter().filter(|c| seen.insert(c.match_key())).collect()
    })
}

fn arb_ignored_call() -> impl Strategy<Value = FunctionCall> {
    prop::sample::select(DEFAULT_IGNORE_CALLS.to_vec())
        .prop_map(|name| FunctionCall::new(name).with_arg("ticket_id", "7"))
}

fn score(metric: FunctionCallMetric, actual: &[FunctionCall], expected: &[FunctionCall]) -> f64 {
    FunctionCallEvaluator::new(metric).evaluate(actual, expected)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* non-empty list of distinct calls, comparing it with itself SHALL score 1.0.
    #[test]
    fn prop_identical_lists_score_one(calls in arb_distinct_calls(8)) {
        for metric in FunctionCallMetric::ALL {
            prop_assert_eq!(score(metric, &calls, &calls), 1.0, "{:?}", metric);
        }
    }

    /// *For any* two lists with disjoint names, call precision and recall SHALL be 0.0.
    #[test]
    fn prop_disjoint_names_score_zero(
        actual in prop::collection::vec(arb_call(), 0..6),
        expected in prop::collection::vec(arb_call(), 0..6),
    ) {
        let expected: Vec<FunctionCall> = expected
            .into_iter()
            .map(|c| FunctionCall { function_name: format!("{}_expected", c.function_name), ..c })
            .collect();
        let actual: Vec<FunctionCall> = actual
            .into_iter()
            .map(|c| FunctionCall { function_name: format!("{}_actual", c.function_name), ..c })
            .collect();

        prop_assert_eq!(score(FunctionCallMetric::CallPrecision, &actual, &expected), 0.0);
        prop_assert_eq!(score(FunctionCallMetric::CallRecall, &actual, &expected), 0.0);
    }

    /// *For any* lists, call precision SHALL be matched / (matched + unmatched actual)
    /// rounded to two decimals.
    #[test]
    fn prop_call_precision_recovers_counts(
        shared in arb_distinct_calls(5),
        extra in prop::collection::vec(arb_call(), 0..5),
    ) {
        let mut actual = shared.clone();
        actual.extend(extra);

        let matched = match_function_calls(&actual, &shared);
        let hits = matched.matched_calls.len();
        let total = hits + matched.unmatched_actual_calls.len();
        let raw = hits as f64 / total as f64;
        let got = score(FunctionCallMetric::CallPrecision, &actual, &shared);

        prop_assert!((got - raw).abs() <= 0.005 + 1e-12, "{} rounded to {}", raw, got);
        prop_assert_eq!(got, round2(raw));
        prop_assert_eq!(format!("{:.2}", got), format!("{:.2}", raw));
    }

    /// *For any* list, repeating a matched actual call SHALL NOT change the matched names.
    #[test]
    fn prop_duplicate_actual_does_not_change_matches(
        calls in arb_distinct_calls(6),
        index in any::<prop::sample::Index>(),
    ) {
        let mut repeated = calls.clone();
        repeated.push(calls[index.index(calls.len())].clone());

        let once = match_function_calls(&calls, &calls);
        let twice = match_function_calls(&repeated, &calls);

        let once_keys: Vec<_> = once.matched_calls.keys().collect();
        let twice_keys: Vec<_> = twice.matched_calls.keys().collect();
        prop_assert_eq!(once_keys, twice_keys);
        prop_assert!(twice.unmatched_actual_calls.is_empty());
    }

    /// *For any* lists salted with ignored calls, ignored names SHALL appear nowhere in the
    /// match and SHALL NOT change any score.
    #[test]
    fn prop_ignored_calls_have_no_effect(
        actual in prop::collection::vec(arb_call(), 0..5),
        expected in prop::collection::vec(arb_call(), 0..5),
        ignored_actual in prop::collection::vec(arb_ignored_call(), 0..3),
        ignored_expected in prop::collection::vec(arb_ignored_call(), 0..3),
    ) {
        let mut salted_actual = ignored_actual;
        salted_actual.extend(actual.iter().cloned());
        let mut salted_expected = expected.clone();
        salted_expected.extend(ignored_expected);

        let matched = match_function_calls(&salted_actual, &salted_expected);
        let ignored: HashSet<String> =
            DEFAULT_IGNORE_CALLS.iter().map(|n| n.to_lowercase()).collect();

        prop_assert!(matched.matched_calls.keys().all(|k| !ignored.contains(k)));
        prop_assert!(matched.unmatched_actual_calls.iter().all(|k| !ignored.contains(k)));
        prop_assert!(matched.unmatched_expected_calls.iter().all(|k| !ignored.contains(k)));

        for metric in FunctionCallMetric::ALL {
            prop_assert_eq!(
                score(metric, &salted_actual, &salted_expected),
                score(metric, &actual, &expected),
                "{:?}",
                metric
            );
        }
    }

    /// *For any* lists, every score SHALL lie within [0.0, 1.0].
    #[test]
    fn prop_scores_are_bounded(
        actual in prop::collection::vec(arb_call(), 0..6),
        expected in prop::collection::vec(arb_call(), 0..6),
    ) {
        for metric in FunctionCallMetric::ALL {
            let s = score(metric, &actual, &expected);
            prop_assert!((0.0..=1.0).contains(&s), "{:?} scored {}", metric, s);
        }
    }
}
