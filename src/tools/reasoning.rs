//! Reasoning display tool.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Log the model's step-by-step reasoning.
pub struct ShowReasoning;

#[async_trait]
impl Tool for ShowReasoning {
    fn name(&self) -> &str {
        "show_reasoning"
    }

    fn description(&self) -> &str {
        "Record your step-by-step reasoning before acting. Takes a list of short steps."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "steps": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Reasoning steps in order"
                }
            },
            "required": ["steps"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let steps = args["steps"]
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("Missing 'steps' argument"))?;

        for (i, step) in steps.iter().enumerate() {
            let text = step.as_str().map(str::to_string).unwrap_or_else(|| step.to_string());
            tracing::info!(step = i + 1, "{}", text);
        }

        Ok(json!({ "status": "success", "message": "Reasoning displayed" }).to_string())
    }
}
