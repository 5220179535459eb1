//! Polynomial term engine.
//!
//! A deterministic pipeline over sums of monomials in `x`:
//! 1. [`parse`] free-form text into an ordered [`Polynomial`]
//! 2. apply the power rule per term ([`integrate_term`], [`differentiate_term`])
//! 3. [`render`] the result with the `+ C` constant of integration
//! 4. [`compare`] two polynomials for round-trip verification
//!
//! Every operation is pure and total. Mathematical boundary cases come back
//! as values ([`RuleResult::LogarithmicCase`], [`RuleResult::Zero`],
//! [`Comparison::Fail`]) rather than errors.

mod compare;
mod parser;
mod render;
mod rules;
mod term;

pub use compare::{
    compare, normalize, Comparison, Discrepancy, ExponentKey, COEFFICIENT_TOLERANCE,
};
pub use parser::{parse, parse_with_report, ParseReport};
pub use render::{format_significant, render, render_with, Notation, ZERO_TOLERANCE};
pub use rules::{
    differentiate_polynomial, differentiate_term, integrate_polynomial, integrate_term,
    verify_round_trip, LogarithmicTerm, RuleResult,
};
pub use term::{Monomial, Polynomial};
