//! `S0`'s initializer: called through the type name, never curried.

use sablec::verify::ExpectedError;
use sablec::ErrorCode;

use crate::common::{assert_clean, assert_errors, conversion, Scenario};

#[test]
fn initializer_calls() {
    let mut s = Scenario::new();
    let mut stmts = Vec::new();
    for depth in 0..2 {
        let owner = s.ident("S0");
        let callee = s.parens(owner, depth);
        let call = s.call_ab(callee);
        stmts.push(s.let_typed(s.named("S0"), call));
    }
    let init = s.path("S0.init");
    let call = s.call_ab(init);
    stmts.push(s.discard(call));

    let owner = s.ident("S0");
    let compound = s.compound(Some(owner), "init", &["a", "b"]);
    let call = s.call_positional(compound);
    stmts.push(s.discard(call));
    assert_clean(&s.check(stmts));
}

#[test]
fn initializer_values_are_positional() {
    let mut s = Scenario::new();
    let init = s.path("S0.init");
    let bind_init = s.let_named("s0c1", init);
    let owner = s.ident("S0");
    let compound = s.compound(Some(owner), "init", &["a", "b"]);
    let bind_compound = s.let_named("s0c2", compound);

    let first = s.ident("s0c1");
    let bad_first = s.let_typed(s.named("Int"), first);
    let second = s.ident("s0c2");
    let bad_second = s.let_typed(s.named("Int"), second);
    let spans = (s.span_of(first), s.span_of(second));

    assert_errors(
        &s.check(vec![bind_init, bind_compound, bad_first, bad_second]),
        &[
            conversion("(Int, Int) -> S0", "Int", spans.0),
            conversion("(Int, Int) -> S0", "Int", spans.1),
        ],
    );
}

#[test]
fn initializer_needs_its_labels() {
    let mut s = Scenario::new();
    let owner = s.ident("S0");
    let call = s.call_positional(owner);
    let stmt = s.discard(call);
    let span = s.span_of(call);
    assert_errors(
        &s.check(vec![stmt]),
        &[ExpectedError::message("missing argument labels 'a:b:' in call")
            .with_code(ErrorCode::E2011)
            .at(span)],
    );
}

#[test]
fn type_name_alone_is_not_a_value() {
    let mut s = Scenario::new();
    let owner = s.ident("S0");
    let stmt = s.let_named("t", owner);
    let span = s.span_of(owner);
    assert_errors(
        &s.check(vec![stmt]),
        &[ExpectedError::message("type 'S0' cannot be used as a value")
            .with_code(ErrorCode::E2029)
            .at(span)],
    );
}
