use calculus_agent::poly::{
    compare, differentiate_polynomial, differentiate_term, integrate_polynomial, integrate_term,
    parse, parse_with_report, render, verify_round_trip, Comparison, Discrepancy, Monomial,
    Polynomial, RuleResult,
};

fn poly(pairs: &[(f64, f64)]) -> Polynomial {
    Polynomial::from(pairs)
}

fn pairs(poly: &Polynomial) -> Vec<(f64, f64)> {
    poly.iter().map(|t| (t.coefficient, t.exponent)).collect()
}

#[test]
fn parses_reference_expressions() {
    assert_eq!(
        pairs(&parse("4x^6 - 2x^3 + 7x - 4")),
        vec![(4.0, 6.0), (-2.0, 3.0), (7.0, 1.0), (-4.0, 0.0)]
    );
    assert_eq!(pairs(&parse("3x + 5")), vec![(3.0, 1.0), (5.0, 0.0)]);
}

#[test]
fn renders_reference_polynomial() {
    let out = render(&poly(&[(4.0, 6.0), (-2.0, 3.0), (7.0, 1.0), (-4.0, 0.0)]));
    assert_eq!(out, "4x^{6} - 2x^{3} + 7x - 4 + C");
    assert_eq!(out, render(&poly(&[(4.0, 6.0), (-2.0, 3.0), (7.0, 1.0), (-4.0, 0.0)])));
}

#[test]
fn compares_reference_cases() {
    assert_eq!(
        compare(&poly(&[(2.0, 3.0), (5.0, 0.0)]), &poly(&[(2.0, 3.0), (5.0, 0.0)])),
        Comparison::Pass
    );
    assert_eq!(
        compare(&poly(&[(2.0, 3.0)]), &poly(&[(2.0, 3.0), (1.0, 0.0)])),
        Comparison::Fail {
            discrepancies: vec![Discrepancy {
                exponent: 0.0,
                expected: 0.0,
                actual: 1.0
            }]
        }
    );
    assert!(compare(&poly(&[(2.0, 3.0), (3.0, 3.0)]), &poly(&[(5.0, 3.0)])).is_pass());
}

#[test]
fn boundary_cases_are_tagged() {
    assert_eq!(integrate_term(3.0, -1.0), RuleResult::LogarithmicCase);
    assert_eq!(differentiate_term(3.0, 0.0), RuleResult::Zero);
    assert_eq!(differentiate_term(3.0, 0.0).term(), Some(Monomial::new(0.0, 0.0)));
}

#[test]
fn text_to_verified_antiderivative() {
    let report = parse_with_report("∫4x^6 - 2x^3 + 7x - 4 dx");
    assert!(report.is_complete());

    let integral = integrate_polynomial(&report.polynomial).unwrap();
    assert_eq!(
        render(&integral),
        "\\frac{4x^{7}}{7} - \\frac{1x^{4}}{2} + \\frac{7x^{2}}{2} - 4x + C"
    );

    let derivative = differentiate_polynomial(&integral);
    assert!(compare(&report.polynomial, &derivative).is_pass());
    assert!(verify_round_trip(&report.polynomial).unwrap().is_pass());
}

#[test]
fn fractional_and_negative_exponents_round_trip() {
    let original = poly(&[(2.5, 1.5), (3.0, -2.0), (-0.75, 0.5)]);
    assert!(verify_round_trip(&original).unwrap().is_pass());
}

#[test]
fn reciprocal_term_blocks_polynomial_integration() {
    let original = poly(&[(1.0, 2.0), (4.0, -1.0)]);
    let err = verify_round_trip(&original).unwrap_err();
    assert_eq!(err.index, 1);
    assert!(err.to_string().contains("logarithmic_case"));
}

#[test]
fn wrong_antiderivative_is_itemized() {
    // d/dx (x^3 + 2x) = 3x^2 + 2, checked against 3x^2 + 4x.
    let expected = parse("3x^2 + 4x");
    let derivative = differentiate_polynomial(&parse("1x^3 + 2x"));
    let result = compare(&expected, &derivative);
    let exponents: Vec<f64> = result.discrepancies().iter().map(|d| d.exponent).collect();
    assert_eq!(exponents, vec![1.0, 0.0]);
}
