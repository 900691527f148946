//! Free functions reached through the module name.

use sablec::verify::ExpectedError;
use sablec::ErrorCode;

use crate::common::{assert_clean, assert_errors, conversion, Scenario};

#[test]
fn qualified_calls_keep_labels() {
    let mut s = Scenario::new();
    let mut stmts = Vec::new();
    for depth in 0..2 {
        let f1 = s.path("TestModule.f1");
        let callee = s.parens(f1, depth);
        let call = s.call_ab(callee);
        stmts.push(s.discard(call));
    }
    let module = s.ident("TestModule");
    let compound = s.compound(Some(module), "f1", &["a", "b"]);
    let call = s.call_positional(compound);
    stmts.push(s.discard(call));

    let f3 = s.path("TestModule.f3");
    let call = s.call_ab(f3);
    let tried = s.try_expr(call);
    stmts.push(s.discard(tried));
    assert_clean(&s.check(stmts));
}

#[test]
fn qualified_value_reference_has_no_labels() {
    let mut s = Scenario::new();
    let f1 = s.path("TestModule.f1");
    let stmt = s.let_typed(s.named("Int"), f1);
    let span = s.span_of(f1);
    assert_errors(
        &s.check(vec![stmt]),
        &[conversion("(Int, Int) -> Int", "Int", span)],
    );
}

#[test]
fn qualified_overloads_follow_context() {
    let mut s = Scenario::new();
    let f4 = s.path("TestModule.f4");
    let stmt = s.let_typed(s.fn_type(&["Double", "Double"], "Double"), f4);
    assert_clean(&s.check(vec![stmt]));
}

#[test]
fn unknown_module_member() {
    let mut s = Scenario::new();
    let missing = s.path("TestModule.f9");
    let call = s.call_ab(missing);
    let stmt = s.discard(call);
    let span = s.span_of(missing);
    assert_errors(
        &s.check(vec![stmt]),
        &[ExpectedError::message("module 'TestModule' has no member named 'f9'")
            .with_code(ErrorCode::E2028)
            .at(span)],
    );
}
