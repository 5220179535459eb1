//! Display notation for antiderivative families.

use serde::{Deserialize, Serialize};

use super::term::Monomial;

/// Terms smaller than this are treated as exact zero and not rendered.
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Largest denominator tried when looking for a fractional coefficient.
const MAX_DENOMINATOR: i128 = 20;

/// Largest numerator magnitude that is still rendered as a fraction.
const MAX_FRACTION_NUMERATOR: i128 = 10;

const VARIABLE: char = 'x';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    /// `\frac{4x^{7}}{7} - 4x + C`
    #[default]
    Latex,
    /// `4x^7/7 - 4x + C`
    Plain,
}

impl Notation {
    /// Name used on the tool wire and in preference files.
    pub fn as_str(self) -> &'static str {
        match self {
            Notation::Latex => "latex",
            Notation::Plain => "plain",
        }
    }
}

/// Render in LaTeX notation with the trailing `+ C`.
pub fn render(terms: impl AsRef<[Monomial]>) -> String {
    render_with(terms, Notation::Latex)
}

pub fn render_with(terms: impl AsRef<[Monomial]>, notation: Notation) -> String {
    let mut out = String::new();

    for term in terms.as_ref() {
        if term.coefficient.abs() < ZERO_TOLERANCE {
            continue;
        }
        let negative = term.coefficient < 0.0;
        let sign = match (out.is_empty(), negative) {
            (true, false) => "",
            (true, true) => "-",
            (false, false) => " + ",
            (false, true) => " - ",
        };
        out.push_str(sign);
        out.push_str(&render_magnitude(term.coefficient.abs(), term.exponent, notation));
    }

    if out.is_empty() {
        "+ C".to_string()
    } else {
        out.push_str(" + C");
        out
    }
}

fn render_magnitude(magnitude: f64, exponent: f64, notation: Notation) -> String {
    if exponent == 0.0 {
        return format_significant(magnitude);
    }
    if exponent == 1.0 {
        return if magnitude == 1.0 {
            VARIABLE.to_string()
        } else {
            format!("{}{}", format_significant(magnitude), VARIABLE)
        };
    }

    let power = exponent.trunc() as i64;
    let fraction = limit_denominator(magnitude, MAX_DENOMINATOR)
        .filter(|&(num, den)| den != 1 && num.abs() <= MAX_FRACTION_NUMERATOR);

    match (fraction, notation) {
        (Some((num, den)), Notation::Latex) => {
            format!("\\frac{{{num}{VARIABLE}^{{{power}}}}}{{{den}}}")
        }
        (Some((num, den)), Notation::Plain) => format!("{num}{VARIABLE}^{power}/{den}"),
        (None, Notation::Latex) => {
            format!("{}{VARIABLE}^{{{power}}}", format_significant(magnitude))
        }
        (None, Notation::Plain) => format!("{}{VARIABLE}^{power}", format_significant(magnitude)),
    }
}

/// Closest fraction to a non-negative `value` with denominator at most
/// `max_denominator`, computed exactly from the binary value of the float.
///
/// Returns `None` for non-finite input.
fn limit_denominator(value: f64, max_denominator: i128) -> Option<(i128, i128)> {
    let (numerator, denominator) = exact_ratio(value)?;
    if denominator <= max_denominator {
        return Some((numerator, denominator));
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0i128, 1i128, 1i128, 0i128);
    let (mut n, mut d) = (numerator, denominator);
    while d != 0 {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > max_denominator {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max_denominator - q0) / q1;
    let lower = (p0 + k * p1, q0 + k * q1);
    let upper = (p1, q1);

    // |p/q - N/D| = |pD - Nq| / qD; the common D cancels.
    let distance = |(p, q): (i128, i128)| (p * denominator - numerator * q).abs();
    if distance(upper) * lower.1 <= distance(lower) * upper.1 {
        Some(upper)
    } else {
        Some(lower)
    }
}

/// `value` as an exact reduced `numerator / 2^k`. Magnitudes too small for
/// the 128-bit denominator collapse to `0/1`; integers report denominator 1.
fn exact_ratio(value: f64) -> Option<(i128, i128)> {
    if !value.is_finite() {
        return None;
    }
    let value = value.abs();
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mut mantissa, mut exp) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if mantissa == 0 {
        return Some((0, 1));
    }
    while mantissa & 1 == 0 && exp < 0 {
        mantissa >>= 1;
        exp += 1;
    }

    if exp >= 0 {
        // An integer: only the denominator matters to callers.
        let numerator = if exp < 64 {
            (mantissa as i128) << exp
        } else {
            i128::MAX
        };
        return Some((numerator, 1));
    }
    if exp < -120 {
        return Some((0, 1));
    }
    Some((mantissa as i128, 1i128 << (-exp)))
}

/// Four significant digits, `%g` style: trailing zeros removed, scientific
/// notation outside `1e-4 <= |v| < 1e4`.
pub fn format_significant(value: f64) -> String {
    const PRECISION: i32 = 4;

    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exp) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..PRECISION).contains(&exp) {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Polynomial;
    use proptest::prelude::*;

    fn poly(pairs: &[(f64, f64)]) -> Polynomial {
        Polynomial::from(pairs)
    }

    #[test]
    fn renders_integer_polynomial() {
        let out = render(&poly(&[(4.0, 6.0), (-2.0, 3.0), (7.0, 1.0), (-4.0, 0.0)]));
        assert_eq!(out, "4x^{6} - 2x^{3} + 7x - 4 + C");
    }

    #[test]
    fn renders_fractions_of_integrated_sample() {
        let out = render(&poly(&[(4.0 / 7.0, 7.0), (-0.5, 4.0), (3.5, 2.0), (-4.0, 1.0)]));
        assert_eq!(
            out,
            "\\frac{4x^{7}}{7} - \\frac{1x^{4}}{2} + \\frac{7x^{2}}{2} - 4x + C"
        );
    }

    #[test]
    fn plain_notation() {
        let out = render_with(&poly(&[(4.0 / 7.0, 7.0), (-4.0, 1.0), (2.0, 0.0)]), Notation::Plain);
        assert_eq!(out, "4x^7/7 - 4x + 2 + C");
    }

    #[test]
    fn notation_names_match_serde() {
        for notation in [Notation::Latex, Notation::Plain] {
            assert_eq!(serde_json::to_value(notation).unwrap(), notation.as_str());
        }
    }

    #[test]
    fn leading_negative_has_no_spaces() {
        assert_eq!(render(&poly(&[(-3.0, 2.0), (1.0, 1.0)])), "-3x^{2} + x + C");
    }

    #[test]
    fn near_zero_terms_are_omitted() {
        assert_eq!(render(&poly(&[(1e-12, 3.0), (2.0, 1.0)])), "2x + C");
        assert_eq!(render(&poly(&[(1e-11, 3.0)])), "+ C");
    }

    #[test]
    fn empty_polynomial_renders_constant_only() {
        assert_eq!(render(&Polynomial::new()), "+ C");
    }

    #[test]
    fn unit_linear_coefficient_is_implicit() {
        assert_eq!(render(&poly(&[(-1.0, 1.0)])), "-x + C");
        assert_eq!(render(&poly(&[(1.5, 1.0)])), "1.5x + C");
    }

    #[test]
    fn large_numerators_fall_back_to_decimals() {
        // 25/2 has a numerator above the fraction limit.
        assert_eq!(render(&poly(&[(12.5, 2.0)])), "12.5x^{2} + C");
        assert_eq!(render(&poly(&[(123.456, 3.0)])), "123.5x^{3} + C");
        // 0.123456 is closest to 1/8 among small denominators.
        assert_eq!(render(&poly(&[(0.123456, 3.0)])), "\\frac{1x^{3}}{8} + C");
    }

    #[test]
    fn exponent_is_truncated_for_display() {
        assert_eq!(render(&poly(&[(2.0, 2.5)])), "2x^{2} + C");
        assert_eq!(render(&poly(&[(2.0, -2.0)])), "2x^{-2} + C");
    }

    #[test]
    fn significant_digit_formatting() {
        assert_eq!(format_significant(4.0), "4");
        assert_eq!(format_significant(3.14159), "3.142");
        assert_eq!(format_significant(0.5), "0.5");
        assert_eq!(format_significant(1234.5678), "1235");
        assert_eq!(format_significant(12346.0), "1.235e+04");
        assert_eq!(format_significant(0.00012346), "0.0001235");
        assert_eq!(format_significant(0.000012346), "1.235e-05");
    }

    #[test]
    fn limit_denominator_finds_closest_fraction() {
        assert_eq!(limit_denominator(4.0 / 7.0, 20), Some((4, 7)));
        assert_eq!(limit_denominator(0.5, 20), Some((1, 2)));
        assert_eq!(limit_denominator(3.0, 20), Some((3, 1)));
        assert_eq!(limit_denominator(std::f64::consts::PI, 20), Some((22, 7)));
        assert_eq!(limit_denominator(0.001, 20), Some((0, 1)));
        assert_eq!(limit_denominator(f64::NAN, 20), None);
    }

    proptest! {
        #[test]
        fn rendering_is_idempotent(
            pairs in proptest::collection::vec((-100.0f64..100.0, -5.0f64..8.0), 0..6)
        ) {
            let p = poly(&pairs);
            prop_assert_eq!(render(&p), render(&p));
            prop_assert!(render(&p).ends_with("+ C"));
        }
    }
}
