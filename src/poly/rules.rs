//! Power rule for single terms, and its term-by-term lift to polynomials.

use serde::Serialize;
use thiserror::Error;

use super::compare::{compare, Comparison};
use super::term::{Monomial, Polynomial};

/// Outcome of applying the power rule to one term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleResult {
    Success { coefficient: f64, exponent: f64 },
    /// Integrating `x^-1`: the antiderivative is a logarithm, which has no
    /// monomial form.
    LogarithmicCase,
    /// Differentiating a constant.
    Zero,
}

impl RuleResult {
    /// The resulting term. `Zero` maps to `0 * x^0`; the logarithmic case has
    /// no term.
    pub fn term(&self) -> Option<Monomial> {
        match *self {
            RuleResult::Success {
                coefficient,
                exponent,
            } => Some(Monomial::new(coefficient, exponent)),
            RuleResult::Zero => Some(Monomial::new(0.0, 0.0)),
            RuleResult::LogarithmicCase => None,
        }
    }
}

/// `∫ c·x^p dx = c/(p+1) · x^(p+1)`, except at `p = -1`.
pub fn integrate_term(coefficient: f64, exponent: f64) -> RuleResult {
    if exponent == -1.0 {
        return RuleResult::LogarithmicCase;
    }
    let exponent = exponent + 1.0;
    RuleResult::Success {
        coefficient: coefficient / exponent,
        exponent,
    }
}

/// `d/dx c·x^p = c·p · x^(p-1)`, except at `p = 0`.
pub fn differentiate_term(coefficient: f64, exponent: f64) -> RuleResult {
    if exponent == 0.0 {
        return RuleResult::Zero;
    }
    RuleResult::Success {
        coefficient: coefficient * exponent,
        exponent: exponent - 1.0,
    }
}

/// A term the power rule cannot integrate.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[error("term {coefficient}x^-1 integrates to a logarithm (logarithmic_case)")]
pub struct LogarithmicTerm {
    /// Position of the term in the input polynomial.
    pub index: usize,
    pub coefficient: f64,
}

/// Integrate every term in order. Fails on the first `x^-1` term.
pub fn integrate_polynomial(poly: &Polynomial) -> Result<Polynomial, LogarithmicTerm> {
    poly.iter()
        .enumerate()
        .map(|(index, term)| match integrate_term(term.coefficient, term.exponent) {
            RuleResult::Success {
                coefficient,
                exponent,
            } => Ok(Monomial::new(coefficient, exponent)),
            RuleResult::Zero => Ok(Monomial::new(0.0, 0.0)),
            RuleResult::LogarithmicCase => Err(LogarithmicTerm {
                index,
                coefficient: term.coefficient,
            }),
        })
        .collect()
}

/// Differentiate every term in order. Constants vanish from the result.
pub fn differentiate_polynomial(poly: &Polynomial) -> Polynomial {
    poly.iter()
        .filter_map(|term| match differentiate_term(term.coefficient, term.exponent) {
            RuleResult::Success {
                coefficient,
                exponent,
            } => Some(Monomial::new(coefficient, exponent)),
            RuleResult::Zero | RuleResult::LogarithmicCase => None,
        })
        .collect()
}

/// Integrate, differentiate the result, and compare with the input.
pub fn verify_round_trip(poly: &Polynomial) -> Result<Comparison, LogarithmicTerm> {
    let integral = integrate_polynomial(poly)?;
    let derivative = differentiate_polynomial(&integral);
    Ok(compare(poly, &derivative))
}
