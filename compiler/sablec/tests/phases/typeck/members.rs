//! Methods on `S0`, through an instance and through the type.

use sablec::verify::ExpectedError;
use sablec::ErrorCode;

use crate::common::{assert_clean, assert_errors, conversion, Scenario};

#[test]
fn instance_method_calls() {
    let mut s = Scenario::new();
    let mut stmts = Vec::new();
    for depth in 0..3 {
        let f1 = s.path("s0.f1");
        let callee = s.parens(f1, depth);
        let call = s.call_ab(callee);
        stmts.push(s.discard(call));
    }
    let s0 = s.ident("s0");
    let compound = s.compound(Some(s0), "f1", &["a", "b"]);
    let call = s.call_positional(compound);
    stmts.push(s.discard(call));

    let f2 = s.path("s0.f2");
    let first = s.call_ab(f2);
    let a = s.ident("a");
    let second = s.call(first, &[("", a)]);
    let b = s.ident("b");
    let third = s.call(second, &[("", b)]);
    stmts.push(s.discard(third));

    let f4 = s.path("s0.f4");
    let (c, d) = (s.ident("c"), s.ident("d"));
    let call = s.call(f4, &[("c", c), ("d", d)]);
    stmts.push(s.discard(call));
    assert_clean(&s.check(stmts));
}

#[test]
fn instance_method_values() {
    let mut s = Scenario::new();
    let f1 = s.path("s0.f1");
    let bad = s.let_typed(s.named("Int"), f1);
    let span = s.span_of(f1);
    let f4 = s.path("s0.f4");
    let good = s.let_typed(s.fn_type(&["Int", "Int"], "Int"), f4);
    assert_errors(
        &s.check(vec![bad, good]),
        &[conversion("(Int, Int) -> Int", "Int", span)],
    );
}

#[test]
fn type_qualified_method_is_curried() {
    let mut s = Scenario::new();
    let f1 = s.path("S0.f1");
    let stmt = s.let_typed(s.named("Int"), f1);
    let span = s.span_of(f1);
    assert_errors(
        &s.check(vec![stmt]),
        &[conversion("(S0) -> (Int, Int) -> Int", "Int", span)],
    );
}

#[test]
fn curried_method_calls_keep_inner_labels() {
    let mut s = Scenario::new();
    let mut stmts = Vec::new();
    for depth in 0..2 {
        let f1 = s.path("S0.f1");
        let callee = s.parens(f1, depth);
        let s0 = s.ident("s0");
        let applied = s.call(callee, &[("", s0)]);
        let call = s.call_ab(applied);
        stmts.push(s.discard(call));
    }
    let owner = s.ident("S0");
    let compound = s.compound(Some(owner), "f1", &["a", "b"]);
    let s0 = s.ident("s0");
    let applied = s.call(compound, &[("", s0)]);
    let call = s.call_positional(applied);
    stmts.push(s.discard(call));
    assert_clean(&s.check(stmts));
}

#[test]
fn partially_applied_method_value() {
    let mut s = Scenario::new();
    let f1 = s.path("S0.f1");
    let s0 = s.ident("s0");
    let applied = s.call(f1, &[("", s0)]);
    let bind = s.let_named("f1OneLevel", applied);
    let one_level = s.ident("f1OneLevel");
    let bad = s.let_typed(s.named("Int"), one_level);
    let span = s.span_of(one_level);
    assert_errors(
        &s.check(vec![bind, bad]),
        &[conversion("(Int, Int) -> Int", "Int", span)],
    );
}

#[test]
fn unknown_member() {
    let mut s = Scenario::new();
    let missing = s.path("s0.f9");
    let stmt = s.discard(missing);
    let span = s.span_of(missing);
    let owner = s.ident("S0");
    let compound = s.compound(Some(owner), "f1", &["x", "y"]);
    let compound_stmt = s.discard(compound);
    let compound_span = s.span_of(compound);
    assert_errors(
        &s.check(vec![stmt, compound_stmt]),
        &[
            ExpectedError::message("value of type 'S0' has no member 'f9'")
                .with_code(ErrorCode::E2028)
                .at(span),
            ExpectedError::message("type 'S0' has no member 'f1(x:y:)'")
                .with_code(ErrorCode::E2003)
                .at(compound_span),
        ],
    );
}
