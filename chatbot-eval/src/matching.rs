//! Function-call matching
//!
//! Aligns the calls a chatbot made with the calls it was expected to make. Calls are
//! matched by lower-cased function name only: order and repetition are not considered.
//! When a name repeats, the arguments of its last occurrence on each side are kept.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::criteria::MatchConfig;
use crate::schema::FunctionCall;

/// Stand-in for an argument missing on the other side. Never similar to a real value.
pub const MISSING_ARGUMENT: &str = "__invalid__";

/// Arguments seen on each side for one matched function name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionArgsMatch {
    /// Arguments of the last actual call with this name
    pub actual_args: HashMap<String, String>,
    /// Arguments of the last expected call with this name
    pub expected_args: HashMap<String, String>,
}

/// Outcome of matching actual calls against expected calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallMatch {
    /// Names present on both sides, with their arguments
    pub matched_calls: BTreeMap<String, FunctionArgsMatch>,
    /// Expected names the chatbot never called, one entry per expected call
    pub unmatched_expected_calls: Vec<String>,
    /// Names the chatbot called that were not expected, one entry per actual call
    pub unmatched_actual_calls: Vec<String>,
    /// Expected calls that were not ignored, duplicates included
    pub expected_call_count: usize,
}

impl FunctionCallMatch {
    /// Whether no function name was found on both sides
    pub fn is_empty(&self) -> bool {
        self.matched_calls.is_empty()
    }
}

/// Match calls using the default ignore list
pub fn match_function_calls(
    actual: &[FunctionCall],
    expected: &[FunctionCall],
) -> FunctionCallMatch {
    match_function_calls_with_config(actual, expected, &MatchConfig::default())
}

/// Match calls, skipping every name in `config.ignore_calls` on both sides
pub fn match_function_calls_with_config(
    actual: &[FunctionCall],
    expected: &[FunctionCall],
    config: &MatchConfig,
) -> FunctionCallMatch {
    let ignored = config.ignored_names();
    let actual_names: HashSet<String> = actual.iter().map(FunctionCall::match_key).collect();
    let expected_names: HashSet<String> = expected.iter().map(FunctionCall::match_key).collect();

    let mut result = FunctionCallMatch::default();

    for call in actual {
        let name = call.match_key();
        if ignored.contains(&name) {
            continue;
        }
        if expected_names.contains(&name) {
            let args = FunctionArgsMatch {
                actual_args: call.arguments.clone(),
                expected_args: HashMap::new(),
            };
            result.matched_calls.insert(name, args);
        } else {
            result.unmatched_actual_calls.push(name);
        }
    }

    for call in expected {
        let name = call.match_key();
        if ignored.contains(&name) {
            continue;
        }
        result.expected_call_count += 1;
        if actual_names.contains(&name) {
            result.matched_calls.entry(name).or_default().expected_args = call.arguments.clone();
        } else {
            result.unmatched_expected_calls.push(name);
        }
    }

    tracing::trace!(
        matched = result.matched_calls.len(),
        unmatched_actual = result.unmatched_actual_calls.len(),
        unmatched_expected = result.unmatched_expected_calls.len(),
        "matched function calls"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_ticket() -> FunctionCall {
        FunctionCall::new("TicketManagementPlugin-create_support_ticket").with_args([
            ("title", "Email client crashes on startup"),
            ("department", "IT"),
            ("priority", "High"),
            ("workflow_type", "Standard"),
        ])
    }

    fn get_departments() -> FunctionCall {
        FunctionCall::new("ReferenceDataPlugin-get_departments")
    }

    #[test]
    fn test_exact_match_single_call() {
        let result = match_function_calls(&[create_ticket()], &[create_ticket()]);

        assert_eq!(result.matched_calls.len(), 1);
        assert!(result.unmatched_actual_calls.is_empty());
        assert!(result.unmatched_expected_calls.is_empty());

        let entry = &result.matched_calls["ticketmanagementplugin-create_support_ticket"];
        assert_eq!(entry.actual_args, create_ticket().arguments);
        assert_eq!(entry.expected_args, create_ticket().arguments);
    }

    #[test]
    fn test_unmatched_on_both_sides() {
        let result = match_function_calls(&[create_ticket()], &[get_departments()]);

        assert!(result.is_empty());
        assert_eq!(
            result.unmatched_actual_calls,
            vec!["ticketmanagementplugin-create_support_ticket"]
        );
        assert_eq!(result.unmatched_expected_calls, vec!["referencedataplugin-get_departments"]);
        assert_eq!(result.expected_call_count, 1);
    }

    #[test]
    fn test_case_insensitive_names() {
        let shouting = FunctionCall {
            function_name: "ticketMANAGEMENTPlugin-create_support_ticket".to_string(),
            ..create_ticket()
        };
        let result = match_function_calls(&[shouting], &[create_ticket()]);

        assert_eq!(result.matched_calls.len(), 1);
        assert!(result.unmatched_actual_calls.is_empty());
        assert!(result.unmatched_expected_calls.is_empty());
    }

    #[test]
    fn test_missing_argument_is_kept_per_side() {
        let mut partial = create_ticket();
        partial.arguments.remove("workflow_type");

        let result = match_function_calls(&[partial], &[create_ticket()]);
        let entry = &result.matched_calls["ticketmanagementplugin-create_support_ticket"];
        assert!(!entry.actual_args.contains_key("workflow_type"));
        assert!(entry.expected_args.contains_key("workflow_type"));
    }

    #[test]
    fn test_duplicates_collapse_last_write_wins() {
        let first = create_ticket().with_arg("title", "first");
        let second = create_ticket().with_arg("title", "second");
        let expected_a = create_ticket().with_arg("title", "expected a");
        let expected_b = create_ticket().with_arg("title", "expected b");

        let result = match_function_calls(&[first, second], &[expected_a, expected_b]);

        assert_eq!(result.matched_calls.len(), 1);
        let entry = &result.matched_calls["ticketmanagementplugin-create_support_ticket"];
        assert_eq!(entry.actual_args["title"], "second");
        assert_eq!(entry.expected_args["title"], "expected b");
        assert_eq!(result.expected_call_count, 2);
    }

    #[test]
    fn test_ignored_calls_skipped_on_actual_side() {
        let start_over = FunctionCall::new("CommonPlugin-start_over");
        let result = match_function_calls(&[create_ticket(), start_over], &[create_ticket()]);

        assert_eq!(result.matched_calls.len(), 1);
        assert!(result.unmatched_actual_calls.is_empty());
    }

    #[test]
    fn test_ignored_calls_skipped_on_expected_side_only() {
        // An ignored name present only in the expected list is not reported as missing
        let explain = FunctionCall::new("CommonPlugin-explain_workflow");
        let result = match_function_calls(&[create_ticket()], &[explain, create_ticket()]);

        assert_eq!(result.matched_calls.len(), 1);
        assert!(result.unmatched_expected_calls.is_empty());
        assert_eq!(result.expected_call_count, 1);
    }

    #[test]
    fn test_ignored_calls_on_both_sides_never_match() {
        let summarize = FunctionCall::new("COMMONPLUGIN-SUMMARIZE_TICKET_DETAILS");
        let result = match_function_calls(
            &[summarize.clone(), create_ticket()],
            &[summarize, create_ticket()],
        );

        assert!(!result.matched_calls.contains_key("commonplugin-summarize_ticket_details"));
        assert_eq!(result.matched_calls.len(), 1);
    }

    #[test]
    fn test_custom_ignore_list() {
        let clarify = FunctionCall::new("CommonPlugin-ask_clarification").with_arg("question", "?");
        let config = MatchConfig::default().with_ignore_calls(["CommonPlugin-ask_clarification"]);

        let result = match_function_calls_with_config(
            &[create_ticket(), clarify.clone()],
            &[create_ticket()],
            &config,
        );
        assert!(result.unmatched_actual_calls.is_empty());

        let result = match_function_calls(&[create_ticket(), clarify], &[create_ticket()]);
        assert_eq!(result.unmatched_actual_calls, vec!["commonplugin-ask_clarification"]);
    }

    #[test]
    fn test_empty_lists() {
        let result = match_function_calls(&[], &[]);
        assert_eq!(result, FunctionCallMatch::default());
    }
}
