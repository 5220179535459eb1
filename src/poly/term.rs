//! Monomial and polynomial value types.

use serde::{Deserialize, Serialize};

/// A single term `coefficient * x^exponent`.
///
/// Serialized with the short field names used on the tool wire:
/// `{"coeff": 4.0, "power": 6.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Monomial {
    #[serde(rename = "coeff")]
    pub coefficient: f64,
    #[serde(rename = "power")]
    pub exponent: f64,
}

impl Monomial {
    pub fn new(coefficient: f64, exponent: f64) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }
}

impl From<(f64, f64)> for Monomial {
    fn from((coefficient, exponent): (f64, f64)) -> Self {
        Self::new(coefficient, exponent)
    }
}

/// An ordered, uncombined sequence of monomials.
///
/// Order is the scan order of the source text (or processing order for
/// derived results). It matters for display only; equality in the
/// mathematical sense is decided by [`crate::poly::compare`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial {
    terms: Vec<Monomial>,
}

impl Polynomial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, term: Monomial) {
        self.terms.push(term);
    }

    pub fn terms(&self) -> &[Monomial] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Monomial> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl From<Vec<Monomial>> for Polynomial {
    fn from(terms: Vec<Monomial>) -> Self {
        Self { terms }
    }
}

impl From<&[(f64, f64)]> for Polynomial {
    fn from(pairs: &[(f64, f64)]) -> Self {
        pairs.iter().copied().map(Monomial::from).collect()
    }
}

impl FromIterator<Monomial> for Polynomial {
    fn from_iter<I: IntoIterator<Item = Monomial>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Polynomial {
    type Item = &'a Monomial;
    type IntoIter = std::slice::Iter<'a, Monomial>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl AsRef<[Monomial]> for Polynomial {
    fn as_ref(&self) -> &[Monomial] {
        &self.terms
    }
}
