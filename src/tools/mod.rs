//! Tool system for the agent.
//!
//! Each tool wraps one deterministic operation of the polynomial engine and
//! speaks JSON in both directions: arguments arrive as a JSON object chosen
//! by the model, results go back as a JSON string.

mod notation;
mod polynomial;
mod reasoning;
mod verify;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionDefinition, ToolDefinition};
use crate::poly::Polynomial;

pub use notation::FormatPolynomial;
pub use polynomial::{DifferentiateTerm, IntegrateTerm, ParsePolynomial};
pub use reasoning::ShowReasoning;
pub use verify::ComparePolynomials;

/// A tool the model can call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name used in function calls.
    fn name(&self) -> &str;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. Errors are reported back to the model as text.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of available tools, in registration order.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Registry with every engine tool.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(ShowReasoning));
        registry.register(Arc::new(ParsePolynomial));
        registry.register(Arc::new(IntegrateTerm));
        registry.register(Arc::new(DifferentiateTerm));
        registry.register(Arc::new(FormatPolynomial));
        registry.register(Arc::new(ComparePolynomials));
        registry
    }

    pub fn empty() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Add a tool, replacing any tool registered under the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.ordered()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Function-calling schemas for the chat completion request.
    pub fn get_tool_schemas(&self) -> Vec<ToolDefinition> {
        self.ordered()
            .map(|t| ToolDefinition {
                tool_type: "function".to_string(),
                function: FunctionDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tracing::info!(tool = %name, args = %args, "Executing tool");
        let result = tool.execute(args).await;
        match &result {
            Ok(output) => tracing::debug!(tool = %name, output = %output, "Tool finished"),
            Err(e) => tracing::warn!(tool = %name, error = %e, "Tool failed"),
        }
        result
    }

    fn ordered(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a required number argument.
fn number_arg(args: &Value, key: &str) -> anyhow::Result<f64> {
    args[key]
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("Missing or non-numeric '{}' argument", key))
}

/// Read a term list argument. Models sometimes send the list as a JSON
/// string instead of an array, so both are accepted.
fn terms_arg(args: &Value, key: &str) -> anyhow::Result<Polynomial> {
    let value = match &args[key] {
        Value::Null => return Err(anyhow::anyhow!("Missing '{}' argument", key)),
        Value::String(s) => serde_json::from_str(s)?,
        other => other.clone(),
    };
    serde_json::from_value(value)
        .map_err(|e| anyhow::anyhow!("Invalid term list in '{}': {}", key, e))
}

/// JSON schema fragment for a term list.
fn terms_schema(description: &str) -> Value {
    serde_json::json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "properties": {
                "coeff": { "type": "number" },
                "power": { "type": "number" }
            },
            "required": ["coeff", "power"]
        }
    })
}
