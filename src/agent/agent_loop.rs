//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, Role, TokenUsage, ToolCall};
use crate::preferences::UserPreferences;
use crate::tools::ToolRegistry;

use super::perception::Perception;
use super::prompt::build_system_prompt;
use super::types::{AgentOutcome, LogEntryType, TaskLogEntry};

/// The calculus agent: perceive once, then decide and act in a loop.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    perception: Perception,
    preferences: UserPreferences,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent around an injected model client.
    pub fn new(config: Config, llm: Arc<dyn LlmClient>, preferences: UserPreferences) -> Self {
        let perception = Perception::new(Arc::clone(&llm), config.default_model.clone());
        let tools = ToolRegistry::new();

        Self {
            config,
            llm,
            perception,
            preferences,
            tools,
        }
    }

    /// Solve a problem and return the final answer with its execution log.
    pub async fn solve(&self, problem: &str) -> anyhow::Result<AgentOutcome> {
        let mut log = Vec::new();
        let model = self.config.default_model.as_str();

        let perceived = self.perception.perceive(problem).await;
        log.push(log_entry(
            LogEntryType::Perception,
            format!(
                "{:?}: {} ({})",
                perceived.problem_type,
                perceived.expression,
                perceived.reasoning.join("; ")
            ),
        ));

        let verify = self
            .config
            .verify_override
            .unwrap_or(self.preferences.verification_required);
        let system_prompt = build_system_prompt(&self.preferences, &perceived, &self.tools, verify);
        let mut messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(problem),
        ];

        let tool_schemas = self.tools.get_tool_schemas();
        let mut usage = TokenUsage::default();

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let response = match self
                .llm
                .chat_completion(model, &messages, Some(&tool_schemas))
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    log.push(log_entry(LogEntryType::Error, e.to_string()));
                    return Err(anyhow::anyhow!("LLM error: {}", e));
                }
            };

            tracing::debug!(
                finish_reason = ?response.finish_reason,
                usage = ?response.usage,
                "Model turn finished"
            );
            if let Some(turn) = &response.usage {
                usage.add(turn);
            }

            if let Some(tool_calls) = response.tool_calls.filter(|calls| !calls.is_empty()) {
                messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: response.content.clone(),
                    tool_calls: Some(tool_calls.clone()),
                    tool_call_id: None,
                });

                for tool_call in &tool_calls {
                    log.push(log_entry(
                        LogEntryType::ToolCall,
                        format!(
                            "Calling tool: {} with args: {}",
                            tool_call.function.name, tool_call.function.arguments
                        ),
                    ));

                    let result_str = match self.execute_tool_call(tool_call).await {
                        Ok(output) => output,
                        Err(e) => format!("Error: {}", e),
                    };

                    log.push(log_entry(
                        LogEntryType::ToolResult,
                        truncate_for_log(&result_str, 1000),
                    ));
                    messages.push(ChatMessage::tool_result(&tool_call.id, result_str));
                }

                continue;
            }

            if let Some(content) = response.content {
                log.push(log_entry(
                    LogEntryType::Response,
                    truncate_for_log(&content, 2000),
                ));
                return Ok(AgentOutcome {
                    answer: content,
                    perceived,
                    iterations: iteration + 1,
                    usage,
                    log,
                });
            }

            return Err(anyhow::anyhow!("LLM returned empty response"));
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without completion",
            self.config.max_iterations
        ))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

fn log_entry(entry_type: LogEntryType, content: String) -> TaskLogEntry {
    TaskLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        entry_type,
        content,
    }
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated]", &s[..end])
    }
}
