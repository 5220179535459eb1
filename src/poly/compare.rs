//! Order-independent equality of polynomials.
//!
//! Both sides are normalized into exponent-keyed maps (exponent and each
//! term's coefficient rounded to 6 decimals, like terms summed). Equal maps
//! pass outright. Otherwise every exponent in either map is checked, highest
//! first, and coefficients differing by more than [`COEFFICIENT_TOLERANCE`]
//! are reported.
//!
//! The two stages are separate: two inputs can fail the exact map
//! comparison yet produce no discrepancy in the tolerant pass, which
//! yields `Fail` with an empty list.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::term::Monomial;

pub const COEFFICIENT_TOLERANCE: f64 = 1e-9;

/// A coefficient mismatch at one exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Discrepancy {
    #[serde(rename = "power")]
    pub exponent: f64,
    pub expected: f64,
    #[serde(rename = "got")]
    pub actual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    Pass,
    Fail { discrepancies: Vec<Discrepancy> },
}

impl Comparison {
    pub fn is_pass(&self) -> bool {
        matches!(self, Comparison::Pass)
    }

    /// Mismatches in descending exponent order; empty on `Pass`.
    pub fn discrepancies(&self) -> &[Discrepancy] {
        match self {
            Comparison::Pass => &[],
            Comparison::Fail { discrepancies } => discrepancies,
        }
    }
}

/// Exponent rounded to 6 decimals, totally ordered via [`f64::total_cmp`].
#[derive(Debug, Clone, Copy)]
pub struct ExponentKey(f64);

impl ExponentKey {
    fn new(exponent: f64) -> Self {
        // `+ 0.0` folds -0.0 into 0.0 so both land on one key.
        Self(round6(exponent) + 0.0)
    }

    pub fn exponent(self) -> f64 {
        self.0
    }
}

impl PartialEq for ExponentKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExponentKey {}

impl PartialOrd for ExponentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExponentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Compare `expected` against `actual`.
pub fn compare(expected: impl AsRef<[Monomial]>, actual: impl AsRef<[Monomial]>) -> Comparison {
    let expected = normalize(expected.as_ref());
    let actual = normalize(actual.as_ref());

    if expected == actual {
        return Comparison::Pass;
    }

    let mut exponents: Vec<ExponentKey> = expected.keys().chain(actual.keys()).copied().collect();
    exponents.sort_unstable_by(|a, b| b.cmp(a));
    exponents.dedup();

    let discrepancies = exponents
        .into_iter()
        .filter_map(|key| {
            let want = expected.get(&key).copied().unwrap_or(0.0);
            let got = actual.get(&key).copied().unwrap_or(0.0);
            ((want - got).abs() > COEFFICIENT_TOLERANCE).then(|| Discrepancy {
                exponent: key.exponent(),
                expected: want,
                actual: got,
            })
        })
        .collect();

    Comparison::Fail { discrepancies }
}

/// Exponent-keyed map with like terms summed.
pub fn normalize(terms: &[Monomial]) -> BTreeMap<ExponentKey, f64> {
    let mut normalized = BTreeMap::new();
    for term in terms {
        *normalized
            .entry(ExponentKey::new(term.exponent))
            .or_insert(0.0) += round6(term.coefficient);
    }
    normalized
}

/// Round to 6 decimals from the exact binary value, in one step.
///
/// Scaling by 1e6 first would round twice and overflow above ~1.8e302.
fn round6(value: f64) -> f64 {
    format!("{:.6}", value).parse().unwrap_or(value)
}
