//! Problem classification through the language model.

use std::sync::Arc;

use serde::Deserialize;

use super::types::{PerceivedQuery, ProblemType};
use crate::llm::{ChatMessage, LlmClient};

const CLASSIFIER_PROMPT: &str = r#"You are a mathematical problem classifier.

Analyze the given integration or differentiation problem and extract structured information.

CLASSIFICATION RULES:
1. polynomial - only powers of one variable with numeric coefficients (e.g. 4x^6 - 2x^3 + 7x - 4)
2. symbolic - contains trigonometric, exponential or logarithmic functions
3. unknown - several variables, invalid syntax, or not confident

Respond ONLY with JSON, no markdown:
{
  "problem_type": "polynomial" | "symbolic" | "unknown",
  "expression": "<cleaned expression without integral sign or dx>",
  "variable": "<variable letter>",
  "reasoning": ["[CLASSIFICATION] ...", "[DECISION] ..."],
  "key_features": {"has_trig": false, "has_exp": false, "has_log": false, "has_polynomials": true, "max_power": 6}
}"#;

#[derive(Deserialize)]
struct Classification {
    problem_type: Option<ProblemType>,
    expression: Option<String>,
    variable: Option<String>,
    #[serde(default)]
    reasoning: Vec<String>,
    #[serde(default)]
    key_features: serde_json::Map<String, serde_json::Value>,
}

/// Classifies raw problems. Never fails: any model or parse error produces
/// an `Unknown` classification.
pub struct Perception {
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl Perception {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub async fn perceive(&self, query: &str) -> PerceivedQuery {
        let messages = [
            ChatMessage::system(CLASSIFIER_PROMPT),
            ChatMessage::user(format!("USER QUERY: {}", query)),
        ];

        let reply = match self.llm.chat_completion(&self.model, &messages, None).await {
            Ok(response) => response.content.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Classification request failed");
                return PerceivedQuery::fallback(query, e.to_string());
            }
        };

        match interpret(query, &reply) {
            Ok(perceived) => {
                tracing::info!(
                    problem_type = ?perceived.problem_type,
                    expression = %perceived.expression,
                    "Classified problem"
                );
                perceived
            }
            Err(e) => {
                tracing::warn!(error = %e, reply = %reply, "Unreadable classification");
                PerceivedQuery::fallback(query, format!("unreadable classification: {}", e))
            }
        }
    }
}

/// Parse the model's reply, tolerating Markdown code fences.
fn interpret(query: &str, reply: &str) -> Result<PerceivedQuery, serde_json::Error> {
    let parsed: Classification = serde_json::from_str(strip_code_fence(reply))?;
    Ok(PerceivedQuery {
        original_query: query.to_string(),
        problem_type: parsed.problem_type.unwrap_or(ProblemType::Unknown),
        expression: parsed.expression.unwrap_or_else(|| query.to_string()),
        variable: parsed.variable.unwrap_or_else(|| "x".to_string()),
        reasoning: parsed.reasoning,
        key_features: parsed.key_features,
    })
}

fn strip_code_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let body = if let Some((_, rest)) = reply.split_once("```json") {
        rest
    } else if let Some((_, rest)) = reply.split_once("```") {
        rest
    } else {
        return reply;
    };
    body.split("```").next().unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatResponse, LlmError, ToolDefinition};
    use async_trait::async_trait;

    struct CannedLlm(Result<String, u16>);

    #[async_trait]
    impl LlmClient for CannedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[ToolDefinition]>,
        ) -> Result<ChatResponse, LlmError> {
            match &self.0 {
                Ok(content) => Ok(ChatResponse {
                    content: Some(content.clone()),
                    ..Default::default()
                }),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    fn perception(reply: Result<&str, u16>) -> Perception {
        Perception::new(Arc::new(CannedLlm(reply.map(str::to_string))), "test-model")
    }

    #[tokio::test]
    async fn reads_fenced_json_reply() {
        let reply = "```json\n{\"problem_type\": \"polynomial\", \"expression\": \"4x^6 - 4\", \"variable\": \"x\", \"key_features\": {\"max_power\": 6}}\n```";
        let perceived = perception(Ok(reply)).perceive("∫4x^6 - 4 dx").await;
        assert_eq!(perceived.problem_type, ProblemType::Polynomial);
        assert_eq!(perceived.expression, "4x^6 - 4");
        assert_eq!(perceived.key_features["max_power"], 6);
    }

    #[tokio::test]
    async fn garbage_reply_falls_back_to_unknown() {
        let perceived = perception(Ok("I think it's a polynomial")).perceive("∫x dx").await;
        assert_eq!(perceived.problem_type, ProblemType::Unknown);
        assert_eq!(perceived.expression, "∫x dx");
        assert!(perceived.reasoning[0].starts_with("[ERROR]"));
    }

    #[tokio::test]
    async fn request_failure_falls_back_to_unknown() {
        let perceived = perception(Err(503)).perceive("∫sin(x) dx").await;
        assert_eq!(perceived.problem_type, ProblemType::Unknown);
        assert!(perceived.reasoning[0].contains("503"));
    }

    #[test]
    fn strips_plain_fences() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
    }
}
