//! Whole-unit behavior: several bodies, configuration, diagnostic order.

use pretty_assertions::assert_eq;
use sablec::verify::ExpectedError;
use sablec::{CheckConfig, DiagnosticConfig, ErrorCode, SessionConfig};

use crate::common::{assert_errors, conversion, Scenario};

#[test]
fn bodies_are_checked_independently() {
    let mut s = Scenario::new();
    let mut bodies = Vec::new();
    let mut spans = Vec::new();
    for _ in 0..8 {
        let f1 = s.ident("f1");
        let stmt = s.let_typed(s.named("Int"), f1);
        spans.push(s.span_of(f1));
        let f4 = s.ident("f4");
        let local = s.let_typed(s.fn_type(&["Int", "Int"], "Int"), f4);
        bodies.push(vec![stmt, local]);
    }
    let unit = s.into_unit(bodies);
    let outcome = unit.check(&SessionConfig {
        diagnostics: DiagnosticConfig::unlimited(),
        ..SessionConfig::default()
    });

    assert_eq!(outcome.errors.len(), 8);
    let expected: Vec<ExpectedError> = spans
        .into_iter()
        .map(|span| conversion("(Int, Int) -> Int", "Int", span))
        .collect();
    assert_errors(&outcome, &expected);

    // Errors keep body order; diagnostics are sorted by position.
    let starts: Vec<u32> = outcome
        .diagnostics
        .iter()
        .filter_map(|d| d.primary_span())
        .map(|span| span.start)
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn locals_do_not_leak_between_bodies() {
    let mut s = Scenario::new();
    let f1 = s.ident("f1");
    let bind = s.let_named("g", f1);
    let g = s.ident("g");
    let use_g = s.discard(g);
    let span = s.span_of(g);
    let outcome = s.into_unit(vec![vec![bind], vec![use_g]]).check(&SessionConfig::default());
    assert_errors(
        &outcome,
        &[ExpectedError::message("cannot find 'g' in scope")
            .with_code(ErrorCode::E2003)
            .at(span)],
    );
}

#[test]
fn suppression_off_keeps_labels_on_values() {
    let mut s = Scenario::new();
    let f1 = s.ident("f1");
    let bad = s.let_typed(s.named("Int"), f1);
    let span = s.span_of(f1);

    // Labeled annotations still match: comparison ignores labels.
    let f4 = s.ident("f4");
    let good = s.let_typed(s.fn_type(&["Int", "Int"], "Int"), f4);

    let config = SessionConfig {
        check: CheckConfig {
            suppress_argument_labels: false,
        },
        ..SessionConfig::default()
    };
    let outcome = s.check_with(vec![bad, good], &config);
    assert_errors(
        &outcome,
        &[conversion("(a: Int, b: Int) -> Int", "Int", span)],
    );
}

#[test]
fn one_diagnostic_per_mistake() {
    let mut s = Scenario::new();
    let missing = s.ident("nope");
    let call = s.call_ab(missing);
    let bind = s.let_named("x", call);
    let x = s.ident("x");
    let use_x = s.let_typed(s.named("Int"), x);
    let x = s.ident("x");
    let call_x = s.call_ab(x);
    let use_again = s.discard(call_x);
    let span = s.span_of(missing);

    let outcome = s.check(vec![bind, use_x, use_again]);
    assert_errors(
        &outcome,
        &[ExpectedError::message("cannot find 'nope' in scope").at(span)],
    );
    assert!(outcome.has_errors().is_some());
}
