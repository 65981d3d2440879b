//! Function-call record and dataset schema definitions
//!
//! Defines the canonical [`FunctionCall`] record compared by the evaluators, the raw
//! tool-call shape found in conversation transcripts, and the ground-truth dataset format.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use crate::error::{EvalError, Result};

/// A single tool invocation: a plugin-qualified function name and its arguments.
///
/// Argument values are always strings. Non-string JSON values are converted to their
/// JSON text when a record is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name, e.g. `TicketManagementPlugin-create_support_ticket`
    #[serde(rename = "functionName")]
    pub function_name: String,
    /// Arguments keyed by parameter name
    #[serde(deserialize_with = "stringified_arguments")]
    pub arguments: HashMap<String, String>,
}

impl FunctionCall {
    /// Create a call with no arguments
    pub fn new(function_name: impl Into<String>) -> Self {
        Self { function_name: function_name.into(), arguments: HashMap::new() }
    }

    /// Add a single argument
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Replace all arguments
    pub fn with_args<I, K, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.arguments = args.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Name used for matching: always lower-cased
    pub fn match_key(&self) -> String {
        self.function_name.to_lowercase()
    }

    /// Parse a `{"functionName": ..., "arguments": {...}}` record
    pub fn from_value(value: &Value) -> Result<Self> {
        let call: FunctionCall = serde_json::from_value(value.clone())
            .map_err(|e| EvalError::ParseError(format!("Invalid function call record: {}", e)))?;
        if call.function_name.is_empty() {
            return Err(EvalError::ParseError("functionName must not be empty".to_string()));
        }
        Ok(call)
    }

    /// Parse a list of records, failing on the first malformed one
    pub fn from_values(values: &[Value]) -> Result<Vec<Self>> {
        values.iter().map(Self::from_value).collect()
    }

    /// Convert back to the plain record form
    pub fn to_value(&self) -> Value {
        json!({
            "functionName": self.function_name,
            "arguments": self.arguments,
        })
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn stringify_map(map: &Map<String, Value>) -> HashMap<String, String> {
    map.iter().map(|(k, v)| (k.clone(), stringify(v))).collect()
}

fn stringified_arguments<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Map::<String, Value>::deserialize(deserializer)?;
    Ok(stringify_map(&raw))
}

/// A tool call as recorded in a conversation transcript.
///
/// Transcripts carry either the plugin-qualified `name`, or the plugin and function
/// names separately. Arguments may be an object or a JSON-encoded string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawToolCall {
    /// Plugin-qualified name (`Plugin-function`)
    #[serde(default)]
    pub name: Option<String>,
    /// Bare function name
    #[serde(default)]
    pub function_name: Option<String>,
    /// Plugin the function belongs to
    #[serde(default)]
    pub plugin_name: Option<String>,
    /// Arguments as an object or a JSON string
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl RawToolCall {
    fn resolved_name(&self) -> Option<String> {
        let non_empty =
            |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

        non_empty(&self.name).or_else(|| {
            let function = non_empty(&self.function_name)?;
            Some(match non_empty(&self.plugin_name) {
                Some(plugin) => format!("{}-{}", plugin, function),
                None => function,
            })
        })
    }

    fn resolved_arguments(&self) -> Result<HashMap<String, String>> {
        match &self.arguments {
            None | Some(Value::Null) => Ok(HashMap::new()),
            Some(Value::Object(map)) => Ok(stringify_map(map)),
            Some(Value::String(encoded)) if encoded.trim().is_empty() => Ok(HashMap::new()),
            Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded)? {
                Value::Object(map) => Ok(stringify_map(&map)),
                other => Err(EvalError::ParseError(format!(
                    "Tool call arguments must decode to an object, got {}",
                    other
                ))),
            },
            Some(other) => Err(EvalError::ParseError(format!(
                "Tool call arguments must be an object or JSON string, got {}",
                other
            ))),
        }
    }
}

impl TryFrom<RawToolCall> for FunctionCall {
    type Error = EvalError;

    fn try_from(raw: RawToolCall) -> Result<Self> {
        let function_name = raw.resolved_name().ok_or_else(|| {
            EvalError::ParseError("Tool call has neither name nor function_name".to_string())
        })?;
        let arguments = raw.resolved_arguments()?;
        Ok(Self { function_name, arguments })
    }
}

/// One ground-truth scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthCase {
    /// Scenario template the case was generated from
    #[serde(rename = "scenarioType", default)]
    pub scenario_type: String,
    /// Instructions given to the simulated user
    #[serde(default)]
    pub instructions: String,
    /// Phrase that signals the simulated conversation is finished
    #[serde(default)]
    pub task_completion_condition: String,
    /// Calls the chatbot is expected to make
    pub expected_function_calls: Vec<FunctionCall>,
}

/// A ground-truth case together with the calls the chatbot actually made
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// The ground-truth scenario
    #[serde(flatten)]
    pub case: GroundTruthCase,
    /// Calls collected from the simulated conversation, as plain records
    #[serde(default)]
    pub function_calls: Vec<Value>,
    /// Set when the conversation simulation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl EvaluationInput {
    /// Create an input from typed actual calls
    pub fn new(case: GroundTruthCase, actual: &[FunctionCall]) -> Self {
        Self {
            case,
            function_calls: actual.iter().map(FunctionCall::to_value).collect(),
            error_message: None,
        }
    }
}

/// A dataset of evaluation inputs, stored as a JSON array
#[derive(Debug, Clone, Default)]
pub struct EvaluationDataset {
    /// Rows in file order
    pub rows: Vec<EvaluationInput>,
}

impl EvaluationDataset {
    /// Load a dataset from a JSON array file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let rows: Vec<EvaluationInput> = serde_json::from_str(&content)?;
        Ok(Self { rows })
    }

    /// Save the dataset as a JSON array
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.rows)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save one row per line (JSON Lines)
    pub fn save_jsonl(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        for row in &self.rows {
            serde_json::to_writer(&mut file, row)?;
            file.write_all(b"\n")?;
        }
        file.flush()?;
        Ok(())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
