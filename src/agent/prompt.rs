//! System prompt templates for the agent.

use super::types::{PerceivedQuery, ProblemType};
use crate::preferences::UserPreferences;
use crate::tools::ToolRegistry;

/// Build the system prompt from preferences, the classified problem and the
/// available tools.
pub fn build_system_prompt(
    preferences: &UserPreferences,
    perceived: &PerceivedQuery,
    tools: &ToolRegistry,
    verify: bool,
) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    let workflow = match perceived.problem_type {
        ProblemType::Polynomial => {
            "Parse the expression, apply integrate_term or differentiate_term to every parsed term exactly once, then format the collected terms."
        }
        ProblemType::Symbolic => {
            "The expression contains functions the polynomial tools cannot handle. Solve it by reasoning, state clearly that the result was not tool-verified, and do not call the term tools on non-polynomial parts."
        }
        ProblemType::Unknown => {
            "The classification is uncertain. Try parse_polynomial first; if terms are dropped or nothing parses, explain what is wrong with the input instead of guessing."
        }
    };

    let verification = if verify {
        "Before answering, verify the result: differentiate each integrated term and call compare_polynomials against the parsed terms. If integrate_term reports logarithmic_case, the answer contains ln|x| for that term; say so explicitly."
    } else {
        "Verification is optional."
    };

    format!(
        r#"You are a calculus assistant that solves integration and differentiation problems step by step using deterministic tools.

## User
- Name: {name}
- Explanation style: {style:?}
- Math level: {level:?}
- Preferred method: {method:?}
- Show reasoning: {show_reasoning}
- Notation: {notation}

## Problem
- Type: {problem_type:?}
- Expression: {expression}
- Variable: {variable}

## Available Tools
{tool_descriptions}

## Workflow
{workflow}
{verification}

## Response Format
When done, reply without a tool call. Format the collected terms with format_polynomial_latex, passing notation "{notation}", and give the final antiderivative or derivative exactly as it returns it, followed by a short explanation matching the user's explanation style."#,
        name = preferences.name,
        style = preferences.preferred_explanation_style,
        level = preferences.math_level,
        method = preferences.preferred_method,
        show_reasoning = preferences.show_reasoning,
        notation = preferences.notation_preference.as_str(),
        problem_type = perceived.problem_type,
        expression = perceived.expression,
        variable = perceived.variable,
        tool_descriptions = tool_descriptions,
        workflow = workflow,
        verification = verification,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Notation;

    #[test]
    fn prompt_lists_tools_and_problem() {
        let perceived = PerceivedQuery {
            problem_type: ProblemType::Polynomial,
            expression: "3x + 5".to_string(),
            ..PerceivedQuery::fallback("∫3x + 5 dx", "unused")
        };
        let prompt = build_system_prompt(
            &UserPreferences::default(),
            &perceived,
            &ToolRegistry::new(),
            true,
        );
        assert!(prompt.contains("- **compare_polynomials**"));
        assert!(prompt.contains("Expression: 3x + 5"));
        assert!(prompt.contains("verify the result"));
        assert!(prompt.contains("passing notation \"latex\""));
    }

    #[test]
    fn prompt_carries_plain_notation_preference() {
        let preferences = UserPreferences {
            notation_preference: Notation::Plain,
            ..UserPreferences::default()
        };
        let prompt = build_system_prompt(
            &preferences,
            &PerceivedQuery::fallback("∫3x + 5 dx", "offline"),
            &ToolRegistry::new(),
            false,
        );
        assert!(prompt.contains("- Notation: plain"));
        assert!(prompt.contains("passing notation \"plain\""));
        assert!(!prompt.contains("\"latex\""));
    }
}
