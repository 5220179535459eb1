//! Round-trip verification tool.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{terms_arg, terms_schema, Tool};
use crate::poly::{self, Comparison};

/// Compare two term lists for mathematical equality.
pub struct ComparePolynomials;

#[async_trait]
impl Tool for ComparePolynomials {
    fn name(&self) -> &str {
        "compare_polynomials"
    }

    fn description(&self) -> &str {
        "Check that two term lists describe the same polynomial, ignoring term order and merging like powers. Use it to verify an integral by differentiating it back."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "original_terms": terms_schema("Expected terms"),
                "verified_terms": terms_schema("Terms obtained by re-deriving the result")
            },
            "required": ["original_terms", "verified_terms"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let original = terms_arg(&args, "original_terms")?;
        let verified = terms_arg(&args, "verified_terms")?;

        let result = match poly::compare(&original, &verified) {
            Comparison::Pass => {
                tracing::info!("Verification passed");
                json!({ "status": "pass", "message": "Verification successful" })
            }
            Comparison::Fail { discrepancies } => {
                tracing::info!(count = discrepancies.len(), "Verification failed");
                json!({
                    "status": "fail",
                    "message": "Verification failed",
                    "discrepancies": discrepancies,
                })
            }
        };
        Ok(result.to_string())
    }
}
