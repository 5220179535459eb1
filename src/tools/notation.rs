//! Display formatting tool.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{terms_arg, terms_schema, Tool};
use crate::poly::{self, Notation};

/// Render a term list as an antiderivative family.
pub struct FormatPolynomial;

#[async_trait]
impl Tool for FormatPolynomial {
    fn name(&self) -> &str {
        "format_polynomial_latex"
    }

    fn description(&self) -> &str {
        "Render a list of {coeff, power} terms as LaTeX with the '+ C' constant of integration. Pass notation 'plain' for plain text."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "terms": terms_schema("Terms to render, in display order"),
                "notation": {
                    "type": "string",
                    "enum": ["latex", "plain"],
                    "description": "Output notation (default: latex)"
                }
            },
            "required": ["terms"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let terms = terms_arg(&args, "terms")?;
        let notation = match args["notation"].as_str() {
            None | Some("latex") => Notation::Latex,
            Some("plain") => Notation::Plain,
            Some(other) => return Err(anyhow::anyhow!("Unknown notation: {}", other)),
        };

        let rendered = poly::render_with(&terms, notation);
        Ok(json!({ "status": "success", "latex": rendered }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn formats_terms_as_latex() {
        let out = FormatPolynomial
            .execute(json!({
                "terms": [
                    {"coeff": 4.0, "power": 6.0},
                    {"coeff": -2.0, "power": 3.0},
                    {"coeff": 7.0, "power": 1.0},
                    {"coeff": -4.0, "power": 0.0}
                ]
            }))
            .await
            .unwrap();
        let out: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(out["latex"], "4x^{6} - 2x^{3} + 7x - 4 + C");
    }

    #[tokio::test]
    async fn rejects_unknown_notation() {
        let err = FormatPolynomial
            .execute(json!({ "terms": [], "notation": "mathml" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("mathml"));
    }
}
