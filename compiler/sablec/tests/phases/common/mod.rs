//! Shared scenario for checker phase tests.
//!
//! Every test starts from the same module:
//!
//! ```text
//! module TestModule
//! func f1(a: Int, b: Int) -> Int
//! func f2(a: Int, b: Int) -> (Int) -> (Int) -> Int
//! func f3(a: Int, b: Int) throws -> Int
//! func f4(a: Int, b: Int) -> Int
//! func f4(c: Double, d: Double) -> Double
//! struct S0 {
//!   init(a: Int, b: Int)
//!   func f1(a: Int, b: Int) -> Int
//!   func f2(a: Int, b: Int) -> (Int) -> (Int) -> Int
//!   func f4(a: Int, b: Int) -> Int
//!   func f4(c: Double, d: Double) -> Double
//!   subscript(a: Int, b: Int) -> Int { get set }
//! }
//! ```
//!
//! and one body with parameters `s0: S0, a: Int, b: Int, c: Double,
//! d: Double`.

use sable_ir::{
    CallArg, CompoundName, ExprArena, ExprId, Name, ParsedType, Span, StmtId, StmtKind,
    StringInterner,
};
use sable_types::{DeclSpec, DeclTable, DeclTableBuilder, Idx, Param, Pool};
use sablec::verify::{match_errors, ExpectedError};
use sablec::{Body, BodyParam, CheckOutcome, CompilationUnit, SessionConfig};

pub struct Scenario {
    pub names: StringInterner,
    pub pool: Pool,
    pub table: DeclTable,
    pub arena: ExprArena,
    next_pos: u32,
}

impl Scenario {
    pub fn new() -> Self {
        sablec::init_tracing();
        let names = StringInterner::new();
        let pool = Pool::new();
        let table = {
            let label = |s: &str, ty: Idx| Param::labeled(names.intern(s), ty);
            let ab = || vec![label("a", Idx::INT), label("b", Idx::INT)];
            let cd = || vec![label("c", Idx::DOUBLE), label("d", Idx::DOUBLE)];
            let int_to_int = pool.positional_function(&[Idx::INT], Idx::INT);
            let curried = pool.positional_function(&[Idx::INT], int_to_int);

            let mut builder =
                DeclTableBuilder::new(&pool, &names).module(names.intern("TestModule"));
            let s0 = builder.declare_type(names.intern("S0"));
            for spec in [
                DeclSpec::function(names.intern("f1"), ab(), Idx::INT),
                DeclSpec::function(names.intern("f2"), ab(), curried),
                DeclSpec::function(names.intern("f3"), ab(), Idx::INT).throwing(),
                DeclSpec::function(names.intern("f4"), ab(), Idx::INT),
                DeclSpec::function(names.intern("f4"), cd(), Idx::DOUBLE),
                DeclSpec::initializer(s0, ab()),
                DeclSpec::method(s0, names.intern("f1"), ab(), Idx::INT),
                DeclSpec::method(s0, names.intern("f2"), ab(), curried),
                DeclSpec::method(s0, names.intern("f4"), ab(), Idx::INT),
                DeclSpec::method(s0, names.intern("f4"), cd(), Idx::DOUBLE),
                DeclSpec::subscript(s0, ab(), Idx::INT).settable(),
            ] {
                builder.declare(spec).unwrap();
            }
            builder.finish()
        };
        Scenario {
            names,
            pool,
            table,
            arena: ExprArena::new(),
            next_pos: 0,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.names.intern(s)
    }

    fn span(&mut self) -> Span {
        let start = self.next_pos;
        self.next_pos += 10;
        Span::new(start, start + 5)
    }

    /// Span of an expression built earlier.
    pub fn span_of(&self, expr: ExprId) -> Span {
        self.arena.span(expr)
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        let span = self.span();
        self.arena.int(value, span)
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        let span = self.span();
        self.arena.float(value, span)
    }

    pub fn ident(&mut self, s: &str) -> ExprId {
        let (name, span) = (self.name(s), self.span());
        self.arena.ident(name, span)
    }

    /// `base.member`, where `path` is `"base.member"` of plain names.
    pub fn path(&mut self, path: &str) -> ExprId {
        let mut parts = path.split('.');
        let first = parts.next().unwrap_or_default();
        let mut expr = self.ident(first);
        for part in parts {
            let (name, span) = (self.name(part), self.span());
            expr = self.arena.member(expr, name, span);
        }
        expr
    }

    /// `base.name(l1:l2:)`; `_` spells an unlabeled slot.
    pub fn compound(&mut self, base: Option<ExprId>, s: &str, labels: &[&str]) -> ExprId {
        let labels: Vec<Option<Name>> = labels
            .iter()
            .map(|l| (*l != "_").then(|| self.name(l)))
            .collect();
        let name = CompoundName::new(self.name(s), labels);
        let span = self.span();
        self.arena.compound(base, name, span)
    }

    pub fn parens(&mut self, inner: ExprId, depth: usize) -> ExprId {
        self.arena.parens(inner, depth)
    }

    /// `callee(l1: e1, ...)`; an empty label is a positional argument.
    pub fn call(&mut self, callee: ExprId, args: &[(&str, ExprId)]) -> ExprId {
        let args = self.args(args);
        let span = self.span();
        self.arena.call(callee, args, span)
    }

    /// `callee(a: a, b: a)`, the labeled call every scenario makes.
    pub fn call_ab(&mut self, callee: ExprId) -> ExprId {
        let (a, b) = (self.ident("a"), self.ident("a"));
        self.call(callee, &[("a", a), ("b", b)])
    }

    /// `callee(a, b)` with two positional `Int` arguments.
    pub fn call_positional(&mut self, callee: ExprId) -> ExprId {
        let (a, b) = (self.ident("a"), self.ident("b"));
        self.call(callee, &[("", a), ("", b)])
    }

    pub fn subscript(&mut self, base: ExprId, args: &[(&str, ExprId)]) -> ExprId {
        let args = self.args(args);
        let span = self.span();
        self.arena.subscript(base, args, span)
    }

    pub fn try_expr(&mut self, inner: ExprId) -> ExprId {
        let span = self.span();
        self.arena.try_expr(inner, span)
    }

    fn args(&mut self, args: &[(&str, ExprId)]) -> Vec<CallArg> {
        args.iter()
            .map(|&(label, value)| {
                let span = self.arena.span(value);
                if label.is_empty() {
                    CallArg::positional(value, span)
                } else {
                    CallArg::labeled(self.name(label), value, span)
                }
            })
            .collect()
    }

    fn let_binding(
        &mut self,
        name: Option<&str>,
        ty: Option<ParsedType>,
        init: ExprId,
        mutable: bool,
    ) -> StmtId {
        let name = name.map(|n| self.name(n));
        let span = self.span();
        self.arena.alloc_stmt(
            StmtKind::Let {
                name,
                ty,
                init,
                mutable,
            },
            span,
        )
    }

    /// `let name = init`
    pub fn let_named(&mut self, name: &str, init: ExprId) -> StmtId {
        self.let_binding(Some(name), None, init, false)
    }

    /// `var name = init`
    pub fn var(&mut self, name: &str, init: ExprId) -> StmtId {
        self.let_binding(Some(name), None, init, true)
    }

    /// `let _: ty = init`
    pub fn let_typed(&mut self, ty: ParsedType, init: ExprId) -> StmtId {
        self.let_binding(None, Some(ty), init, false)
    }

    /// `_ = expr`
    pub fn discard(&mut self, expr: ExprId) -> StmtId {
        let span = self.span();
        self.arena.alloc_stmt(StmtKind::Discard(expr), span)
    }

    /// `target = value`
    pub fn assign(&mut self, target: ExprId, value: ExprId) -> StmtId {
        let span = self.span();
        self.arena.alloc_stmt(StmtKind::Assign { target, value }, span)
    }

    pub fn named(&self, s: &str) -> ParsedType {
        ParsedType::Named(self.name(s))
    }

    /// `(p1, p2) -> ret`
    pub fn fn_type(&self, params: &[&str], ret: &str) -> ParsedType {
        ParsedType::function(
            params.iter().map(|p| self.named(p)).collect(),
            self.named(ret),
        )
    }

    /// Check `stmts` as the scenario's body with the default configuration.
    pub fn check(self, stmts: Vec<StmtId>) -> CheckOutcome {
        self.check_with(stmts, &SessionConfig::default())
    }

    pub fn check_with(self, stmts: Vec<StmtId>, config: &SessionConfig) -> CheckOutcome {
        self.into_unit(vec![stmts]).check(config)
    }

    /// A unit with one body per statement list, all sharing the parameters.
    pub fn into_unit(self, bodies: Vec<Vec<StmtId>>) -> CompilationUnit {
        let params: Vec<BodyParam> = [
            ("s0", "S0"),
            ("a", "Int"),
            ("b", "Int"),
            ("c", "Double"),
            ("d", "Double"),
        ]
        .iter()
        .map(|&(name, ty)| BodyParam {
            name: self.name(name),
            ty: self.named(ty),
            mutable: false,
            span: Span::DUMMY,
        })
        .collect();
        let body_names: Vec<Name> = (0..bodies.len())
            .map(|i| self.name(&format!("body{i}")))
            .collect();

        let mut unit = CompilationUnit::new(self.names, self.pool, self.table, self.arena);
        for (name, stmts) in body_names.into_iter().zip(bodies) {
            unit.add_body(Body {
                name,
                params: params.clone(),
                stmts,
            });
        }
        unit
    }
}

/// Assert that `outcome` has exactly the `expected` diagnostics.
#[track_caller]
pub fn assert_errors(outcome: &CheckOutcome, expected: &[ExpectedError]) {
    let result = match_errors(&outcome.diagnostics, expected);
    assert!(
        result.is_exact(),
        "diagnostics did not match:\n{}",
        result.report(&outcome.diagnostics, expected)
    );
}

/// Assert that `outcome` has no diagnostics.
#[track_caller]
pub fn assert_clean(outcome: &CheckOutcome) {
    assert_errors(outcome, &[]);
}

/// A conversion error for `found` against `expected` at `span`.
pub fn conversion(found: &str, expected: &str, span: Span) -> ExpectedError {
    ExpectedError::message(format!(
        "cannot convert value of type '{found}' to specified type '{expected}'"
    ))
    .with_code(sablec::ErrorCode::E2001)
    .at(span)
}
