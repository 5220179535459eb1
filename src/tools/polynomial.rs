//! Parsing and power-rule tools.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{number_arg, Tool};
use crate::poly::{self, RuleResult};

/// Parse a polynomial expression into terms.
pub struct ParsePolynomial;

#[async_trait]
impl Tool for ParsePolynomial {
    fn name(&self) -> &str {
        "parse_polynomial"
    }

    fn description(&self) -> &str {
        "Parse a polynomial in x (e.g. '4x^6 - 2x^3 + 7x - 4') into a list of {coeff, power} terms. Every term needs a numeric coefficient; fragments that could not be read are listed under 'dropped'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The polynomial; an integral sign and trailing 'dx' are ignored"
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let expression = args["expression"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'expression' argument"))?;

        let report = poly::parse_with_report(expression);
        Ok(json!({
            "status": "success",
            "terms": report.polynomial,
            "dropped": report.dropped,
        })
        .to_string())
    }
}

/// Integrate one term with the power rule.
pub struct IntegrateTerm;

#[async_trait]
impl Tool for IntegrateTerm {
    fn name(&self) -> &str {
        "integrate_term"
    }

    fn description(&self) -> &str {
        "Integrate a single term coeff*x^power with the power rule. Returns status 'error' with message 'logarithmic_case' for power -1."
    }

    fn parameters_schema(&self) -> Value {
        term_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let coeff = number_arg(&args, "coeff")?;
        let power = number_arg(&args, "power")?;
        Ok(rule_result_json(poly::integrate_term(coeff, power)).to_string())
    }
}

/// Differentiate one term with the power rule.
pub struct DifferentiateTerm;

#[async_trait]
impl Tool for DifferentiateTerm {
    fn name(&self) -> &str {
        "differentiate_term"
    }

    fn description(&self) -> &str {
        "Differentiate a single term coeff*x^power with the power rule. Returns status 'zero' for constants."
    }

    fn parameters_schema(&self) -> Value {
        term_schema()
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let coeff = number_arg(&args, "coeff")?;
        let power = number_arg(&args, "power")?;
        Ok(rule_result_json(poly::differentiate_term(coeff, power)).to_string())
    }
}

fn term_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "coeff": {
                "type": "number",
                "description": "Coefficient of the term"
            },
            "power": {
                "type": "number",
                "description": "Exponent of x"
            }
        },
        "required": ["coeff", "power"]
    })
}

fn rule_result_json(result: RuleResult) -> Value {
    match result {
        RuleResult::Success {
            coefficient,
            exponent,
        } => json!({ "status": "success", "coeff": coefficient, "power": exponent }),
        RuleResult::LogarithmicCase => json!({ "status": "error", "message": "logarithmic_case" }),
        RuleResult::Zero => json!({ "status": "zero", "coeff": 0.0, "power": 0.0 }),
    }
}
