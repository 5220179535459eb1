//! Agent input/output types.

use serde::{Deserialize, Serialize};

use crate::llm::TokenUsage;

/// Problem class assigned by perception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemType {
    /// Sum of powers of one variable; handled by the term engine.
    Polynomial,
    /// Contains trigonometric, exponential or logarithmic functions.
    Symbolic,
    Unknown,
}

/// Structured reading of the user's problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceivedQuery {
    pub original_query: String,
    pub problem_type: ProblemType,
    pub expression: String,
    pub variable: String,
    pub reasoning: Vec<String>,
    /// Detected features, e.g. `has_trig`, `max_power`.
    pub key_features: serde_json::Map<String, serde_json::Value>,
}

impl PerceivedQuery {
    /// Classification used when the model cannot be reached or answers
    /// nonsense.
    pub fn fallback(query: &str, reason: impl Into<String>) -> Self {
        Self {
            original_query: query.to_string(),
            problem_type: ProblemType::Unknown,
            expression: query.to_string(),
            variable: "x".to_string(),
            reasoning: vec![format!("[ERROR] {}", reason.into())],
            key_features: serde_json::Map::new(),
        }
    }
}

/// A single entry in the agent's execution log.
#[derive(Debug, Clone, Serialize)]
pub struct TaskLogEntry {
    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// Entry type
    pub entry_type: LogEntryType,

    /// Content of the entry
    pub content: String,
}

/// Types of log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryType {
    /// Problem classification
    Perception,
    /// Tool is being called
    ToolCall,
    /// Tool returned a result
    ToolResult,
    /// Agent produced final response
    Response,
    /// An error occurred
    Error,
}

/// Result of solving one problem.
#[derive(Debug, Clone, Serialize)]
pub struct AgentOutcome {
    /// Final answer text from the model
    pub answer: String,

    /// How the problem was classified
    pub perceived: PerceivedQuery,

    /// Decision/action iterations used
    pub iterations: usize,

    /// Tokens consumed by the decision/action loop
    pub usage: TokenUsage,

    /// Detailed execution log
    pub log: Vec<TaskLogEntry>,
}
