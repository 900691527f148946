//! Shared fixture for unit tests: the declarations of the label-suppression
//! scenarios and small builders for reference expressions.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sable_ir::{
    CallArg, CompoundName, ExprArena, ExprId, Name, ParsedType, Span, StmtId, StmtKind,
    StringInterner,
};

use crate::{Checker, DeclSpec, DeclTable, DeclTableBuilder, Idx, Param, Pool};

pub(crate) struct Fixture {
    pub names: StringInterner,
    pub pool: Pool,
    pub table: DeclTable,
    pub arena: ExprArena,
    pub s0: Idx,
    next_pos: u32,
}

impl Fixture {
    /// ```text
    /// module TestModule
    /// func f1(a: Int, b: Int) -> Int
    /// func f2(a: Int, b: Int) -> (Int) -> (Int) -> Int
    /// func f3(a: Int, b: Int) throws -> Int
    /// func f4(a: Int, b: Int) -> Int
    /// func f4(c: Double, d: Double) -> Double
    /// struct S0 {
    ///   init(a: Int, b: Int)
    ///   func f1(a: Int, b: Int) -> Int
    ///   func f2(a: Int, b: Int) -> (Int) -> (Int) -> Int
    ///   func f4(a: Int, b: Int) -> Int
    ///   func f4(c: Double, d: Double) -> Double
    ///   subscript(a: Int, b: Int) -> Int { get set }
    /// }
    /// ```
    pub fn new() -> Self {
        let names = StringInterner::new();
        let pool = Pool::new();
        let (table, s0) = {
            let label = |s: &str, ty: Idx| Param::labeled(names.intern(s), ty);
            let ab = || vec![label("a", Idx::INT), label("b", Idx::INT)];
            let cd = || vec![label("c", Idx::DOUBLE), label("d", Idx::DOUBLE)];
            let int_to_int = pool.positional_function(&[Idx::INT], Idx::INT);
            let f2_ret = pool.positional_function(&[Idx::INT], int_to_int);

            let mut builder =
                DeclTableBuilder::new(&pool, &names).module(names.intern("TestModule"));
            let s0 = builder.declare_type(names.intern("S0"));
            let specs = [
                DeclSpec::function(names.intern("f1"), ab(), Idx::INT),
                DeclSpec::function(names.intern("f2"), ab(), f2_ret),
                DeclSpec::function(names.intern("f3"), ab(), Idx::INT).throwing(),
                DeclSpec::function(names.intern("f4"), ab(), Idx::INT),
                DeclSpec::function(names.intern("f4"), cd(), Idx::DOUBLE),
                DeclSpec::initializer(s0, ab()),
                DeclSpec::method(s0, names.intern("f1"), ab(), Idx::INT),
                DeclSpec::method(s0, names.intern("f2"), ab(), f2_ret),
                DeclSpec::method(s0, names.intern("f4"), ab(), Idx::INT),
                DeclSpec::method(s0, names.intern("f4"), cd(), Idx::DOUBLE),
                DeclSpec::subscript(s0, ab(), Idx::INT).settable(),
            ];
            for spec in specs {
                builder.declare(spec).unwrap();
            }
            (builder.finish(), s0)
        };
        Fixture {
            names,
            pool,
            table,
            arena: ExprArena::new(),
            s0,
            next_pos: 0,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.names.intern(s)
    }

    /// A fresh span, distinct from every earlier one.
    pub fn span(&mut self) -> Span {
        let start = self.next_pos;
        self.next_pos += 10;
        Span::new(start, start + 5)
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

    pub fn member(&mut self, base: ExprId, s: &str) -> ExprId {
        let (name, span) = (self.name(s), self.span());
        self.arena.member(base, name, span)
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

    pub fn let_stmt(&mut self, name: Option<&str>, ty: Option<ParsedType>, init: ExprId) -> StmtId {
        let name = name.map(|n| self.name(n));
        let span = self.span();
        self.arena.alloc_stmt(
            StmtKind::Let {
                name,
                ty,
                init,
                mutable: false,
            },
            span,
        )
    }

    pub fn var_stmt(&mut self, name: &str, init: ExprId) -> StmtId {
        let name = Some(self.name(name));
        let span = self.span();
        self.arena.alloc_stmt(
            StmtKind::Let {
                name,
                ty: None,
                init,
                mutable: true,
            },
            span,
        )
    }

    pub fn discard(&mut self, expr: ExprId) -> StmtId {
        let span = self.span();
        self.arena.alloc_stmt(StmtKind::Discard(expr), span)
    }

    pub fn assign(&mut self, target: ExprId, value: ExprId) -> StmtId {
        let span = self.span();
        self.arena.alloc_stmt(StmtKind::Assign { target, value }, span)
    }

    /// Annotation `Name`.
    pub fn named(&self, s: &str) -> ParsedType {
        ParsedType::Named(self.name(s))
    }

    /// Annotation `(p1, p2) -> ret`.
    pub fn fn_annotation(&self, params: &[&str], ret: &str) -> ParsedType {
        ParsedType::function(
            params.iter().map(|p| self.named(p)).collect(),
            self.named(ret),
        )
    }

    /// Pool type `(p1, p2) -> ret` without labels.
    pub fn fn_type(&self, params: &[Idx], ret: Idx) -> Idx {
        self.pool.positional_function(params, ret)
    }

    pub fn format(&self, ty: Idx) -> String {
        self.pool.format_type(ty, &self.names)
    }

    /// A checker with the parameters `s0: S0, a: Int, b: Int, c: Double,
    /// d: Double` in scope.
    pub fn checker(&self) -> Checker<'_> {
        let mut checker = Checker::new(&self.arena, &self.table, &self.pool, &self.names);
        for (name, ty) in [
            ("s0", self.s0),
            ("a", Idx::INT),
            ("b", Idx::INT),
            ("c", Idx::DOUBLE),
            ("d", Idx::DOUBLE),
        ] {
            checker.declare_local(self.name(name), ty, false, Span::DUMMY);
        }
        checker
    }

    /// Messages of every error the checker reported, in order.
    pub fn messages(&self, checker: &Checker<'_>) -> Vec<String> {
        checker
            .errors()
            .iter()
            .map(|e| e.message(&self.pool, &self.names))
            .collect()
    }
}
