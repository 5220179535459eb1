//! Free-form polynomial text to [`Polynomial`].
//!
//! The input is cleaned (whitespace, the integral sign and the `dx`
//! differential are removed) and then scanned left to right with a single
//! term pattern:
//!
//! ```text
//! sign?  digits[.digits]  x?  ^?  exponent-digits
//! ```
//!
//! A term must start with a digit run. Text the pattern does not cover is
//! skipped; [`parse_with_report`] lists those fragments so callers can tell
//! an empty expression from one that lost terms.
//!
//! The pattern's `\d` is Unicode-aware but numbers are read as ASCII, so a
//! term written with other digits (`٣x^2`) is matched whole and reported as
//! dropped rather than split into misread pieces.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::term::{Monomial, Polynomial};

static TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-]?)(\d+\.?\d*)(x?)(\^?)(\d*\.?\d*)").expect("term pattern is a valid regex")
});

/// Outcome of a parse, including whatever the term pattern skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    pub polynomial: Polynomial,
    /// Non-empty fragments of the cleaned input that produced no term, in
    /// input order.
    pub dropped: Vec<String>,
}

impl ParseReport {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Parse an expression such as `"∫4x^6 - 2x^3 + 7x - 4 dx"`.
///
/// Never fails. Unrecognized fragments are skipped (and logged at `warn`).
pub fn parse(expression: &str) -> Polynomial {
    let report = parse_with_report(expression);
    if !report.is_complete() {
        tracing::warn!(
            input = %expression,
            dropped = ?report.dropped,
            "Parser skipped fragments it could not read as terms"
        );
    }
    report.polynomial
}

/// Parse and report skipped fragments.
pub fn parse_with_report(expression: &str) -> ParseReport {
    let cleaned = clean(expression);
    tracing::debug!(input = %expression, cleaned = %cleaned, "Parsing polynomial");

    let mut polynomial = Polynomial::new();
    let mut dropped = Vec::new();
    let mut cursor = 0;

    for caps in TERM_PATTERN.captures_iter(&cleaned) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_fragment(&mut dropped, &cleaned[cursor..whole.start()]);
        cursor = whole.end();

        match term_from_captures(&caps) {
            Some(term) => polynomial.push(term),
            None => push_fragment(&mut dropped, whole.as_str()),
        }
    }
    push_fragment(&mut dropped, &cleaned[cursor..]);

    tracing::debug!(terms = ?polynomial.terms(), "Parsed polynomial");
    ParseReport {
        polynomial,
        dropped,
    }
}

/// Strip whitespace, the integral sign and the `dx` marker.
fn clean(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace("dx", "")
        .replace('∫', "")
}

fn term_from_captures(caps: &Captures<'_>) -> Option<Monomial> {
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let (sign, digits, variable, caret, power) = (group(1), group(2), group(3), group(4), group(5));

    let magnitude: f64 = digits.parse().ok()?;
    let coefficient = if sign == "-" { -magnitude } else { magnitude };

    let exponent = if variable.is_empty() {
        0.0
    } else if !caret.is_empty() && !power.is_empty() {
        power.parse().ok()?
    } else {
        1.0
    };

    Some(Monomial::new(coefficient, exponent))
}

fn push_fragment(dropped: &mut Vec<String>, fragment: &str) {
    if !fragment.is_empty() {
        dropped.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(poly: &Polynomial) -> Vec<(f64, f64)> {
        poly.iter().map(|t| (t.coefficient, t.exponent)).collect()
    }

    #[test]
    fn parses_mixed_polynomial_in_order() {
        let poly = parse("4x^6 - 2x^3 + 7x - 4");
        assert_eq!(
            pairs(&poly),
            vec![(4.0, 6.0), (-2.0, 3.0), (7.0, 1.0), (-4.0, 0.0)]
        );
    }

    #[test]
    fn parses_linear_with_constant() {
        assert_eq!(pairs(&parse("3x + 5")), vec![(3.0, 1.0), (5.0, 0.0)]);
    }

    #[test]
    fn strips_integral_and_differential() {
        let report = parse_with_report("∫4x^6 - 2x^3 + 7x - 4 dx");
        assert!(report.is_complete());
        assert_eq!(report.polynomial.len(), 4);
    }

    #[test]
    fn decimal_coefficients_and_exponents() {
        assert_eq!(pairs(&parse("2.5x^1.5 + 0.25")), vec![(2.5, 1.5), (0.25, 0.0)]);
    }

    #[test]
    fn leading_plus_keeps_sign_positive() {
        assert_eq!(pairs(&parse("+3x^2")), vec![(3.0, 2.0)]);
    }

    #[test]
    fn does_not_merge_like_terms() {
        assert_eq!(pairs(&parse("2x^3 + 3x^3")), vec![(2.0, 3.0), (3.0, 3.0)]);
    }

    #[test]
    fn bare_variable_is_dropped_and_reported() {
        let report = parse_with_report("3x^2 + x");
        assert_eq!(pairs(&report.polynomial), vec![(3.0, 2.0)]);
        assert_eq!(report.dropped, vec!["+x".to_string()]);
    }

    #[test]
    fn empty_and_garbage_input_yield_no_terms() {
        assert!(parse("").is_empty());
        let report = parse_with_report("sin(x)");
        assert!(report.polynomial.is_empty());
        assert_eq!(report.dropped, vec!["sin(x)".to_string()]);
    }

    #[test]
    fn non_ascii_digit_term_is_dropped_whole() {
        let report = parse_with_report("٣x^2 + 1");
        assert_eq!(pairs(&report.polynomial), vec![(1.0, 0.0)]);
        assert_eq!(report.dropped, vec!["٣x^2".to_string()]);
    }

    #[test]
    fn unreadable_exponent_drops_the_term() {
        let report = parse_with_report("3x^.");
        assert!(report.polynomial.is_empty());
        assert_eq!(report.dropped, vec!["3x^.".to_string()]);
    }
}
