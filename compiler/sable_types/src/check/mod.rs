//! Reference checking for one function body.
//!
//! The [`Checker`] drives binder, label policy and type assigner over a
//! body's statements, checks direct calls and subscripts against declared
//! labels, and records a type for every expression it resolves.
//!
//! Statements are the recovery boundary: an error inside one statement is
//! recorded and checking continues with the next. The error type
//! propagates silently, so one mistake yields one diagnostic.

mod call;
mod expr;

use rustc_hash::FxHashMap;
use sable_ir::{
    ExprArena, ExprId, ExprKind, Name, ParsedType, Span, StmtId, StmtKind, StringInterner,
};

use crate::{
    DeclTable, Idx, Local, MismatchContext, Param, Pool, TypeCheckError, TypeEnv, TypeErrorKind,
};

/// Options that change how references are typed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CheckConfig {
    /// Erase argument labels from the types of value references.
    ///
    /// When off, `let g = f1` keeps the type `(a: Int, b: Int) -> Int`.
    /// Contextual comparison ignores labels either way.
    pub suppress_argument_labels: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckConfig {
            suppress_argument_labels: true,
        }
    }
}

/// Names the checker compares against, interned once.
#[derive(Copy, Clone, Debug)]
struct WellKnown {
    subscript: Name,
    builtins: [(Name, Idx); 5],
}

impl WellKnown {
    fn new(names: &StringInterner) -> Self {
        WellKnown {
            subscript: names.intern("subscript"),
            builtins: [
                (names.intern("Int"), Idx::INT),
                (names.intern("Double"), Idx::DOUBLE),
                (names.intern("Bool"), Idx::BOOL),
                (names.intern("String"), Idx::STRING),
                (names.intern("Void"), Idx::UNIT),
            ],
        }
    }

    fn builtin(&self, name: Name) -> Option<Idx> {
        self.builtins
            .iter()
            .find_map(|&(n, idx)| (n == name).then_some(idx))
    }
}

/// Per-body checking state.
pub struct Checker<'a> {
    pub(crate) arena: &'a ExprArena,
    pub(crate) table: &'a DeclTable,
    pub(crate) pool: &'a Pool,
    pub(crate) config: CheckConfig,
    pub(crate) env: TypeEnv,
    well_known: WellKnown,
    errors: Vec<TypeCheckError>,
    expr_types: FxHashMap<ExprId, Idx>,
    /// Number of enclosing `try` expressions.
    try_depth: u32,
}

impl<'a> Checker<'a> {
    pub fn new(
        arena: &'a ExprArena,
        table: &'a DeclTable,
        pool: &'a Pool,
        names: &'a StringInterner,
    ) -> Self {
        Checker {
            arena,
            table,
            pool,
            config: CheckConfig::default(),
            env: TypeEnv::new(),
            well_known: WellKnown::new(names),
            errors: Vec::new(),
            expr_types: FxHashMap::default(),
            try_depth: 0,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Bring a parameter or local into scope.
    pub fn declare_local(&mut self, name: Name, ty: Idx, mutable: bool, span: Span) {
        let ty = self.value_type(ty);
        self.env.bind(name, Local { ty, mutable, span });
    }

    pub fn errors(&self) -> &[TypeCheckError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<TypeCheckError> {
        self.errors
    }

    /// Type recorded for `expr`, if it was resolved.
    pub fn expr_type(&self, expr: ExprId) -> Option<Idx> {
        self.expr_types.get(&expr).copied()
    }

    pub(crate) fn push_error(&mut self, span: Span, kind: TypeErrorKind) {
        self.report(TypeCheckError::new(span, kind));
    }

    pub(crate) fn report(&mut self, err: TypeCheckError) {
        tracing::trace!(span = ?err.span, kind = ?err.kind, "type error");
        self.errors.push(err);
    }

    pub(crate) fn record(&mut self, expr: ExprId, ty: Idx) {
        self.expr_types.insert(expr, ty);
    }

    /// The type a value of type `ty` is stored with.
    pub(crate) fn value_type(&self, ty: Idx) -> Idx {
        if self.config.suppress_argument_labels {
            self.pool.erase_labels(ty)
        } else {
            ty
        }
    }

    /// Check every statement of a body in order.
    #[tracing::instrument(level = "debug", skip_all, fields(stmts = stmts.len()))]
    pub fn check_body(&mut self, stmts: &[StmtId]) {
        for &stmt in stmts {
            self.check_stmt(stmt);
        }
        tracing::debug!(errors = self.errors.len(), "body checked");
    }

    /// Check one statement.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn check_stmt(&mut self, stmt: StmtId) {
        let arena = self.arena;
        let stmt = arena.stmt(stmt);
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Discard(expr) => {
                self.infer_value(*expr);
            }
            StmtKind::Let {
                name,
                ty,
                init,
                mutable,
            } => {
                let ty = match ty {
                    Some(annotation) => {
                        let expected = self.resolve_annotation(annotation, stmt.span);
                        self.check_against(*init, expected, MismatchContext::Annotation);
                        expected
                    }
                    None => self.infer_value(*init),
                };
                if let Some(name) = name {
                    self.declare_local(*name, ty, *mutable, stmt.span);
                }
            }
            StmtKind::Assign { target, value } => self.check_assign(*target, *value),
        }
    }

    fn check_assign(&mut self, target: ExprId, value: ExprId) {
        let arena = self.arena;
        let target = arena.skip_parens(target);
        let span = arena.span(target);
        match arena.kind(target) {
            ExprKind::Subscript { base, args } => {
                let elem = self.check_subscript_set(target, *base, args);
                self.check_against(value, elem, MismatchContext::Assignment);
            }
            ExprKind::Ident(name) => match self.env.lookup(*name).copied() {
                Some(local) => {
                    if !local.mutable {
                        self.push_error(span, TypeErrorKind::ImmutableLocal { name: *name });
                    }
                    self.check_against(value, local.ty, MismatchContext::Assignment);
                }
                None => {
                    if self.bind_reference(target).is_ok() {
                        self.push_error(span, TypeErrorKind::NotAssignable);
                    } else {
                        self.push_error(span, TypeErrorKind::UnboundName { name: *name });
                    }
                    self.infer_value(value);
                }
            },
            _ => {
                let target_ty = self.infer_value(target);
                if !target_ty.is_error() {
                    self.push_error(span, TypeErrorKind::NotAssignable);
                }
                self.infer_value(value);
            }
        }
    }

    /// Resolve a written type annotation.
    ///
    /// Labels inside function types are kept; comparison ignores them.
    pub fn resolve_annotation(&mut self, ty: &ParsedType, span: Span) -> Idx {
        match ty {
            ParsedType::Unit => Idx::UNIT,
            ParsedType::Named(name) => {
                if let Some(idx) = self.well_known.builtin(*name) {
                    return idx;
                }
                if let Some(idx) = self.table.lookup_type(*name) {
                    return idx;
                }
                self.push_error(span, TypeErrorKind::UnknownType { name: *name });
                Idx::ERROR
            }
            ParsedType::Function {
                params,
                throws,
                ret,
            } => {
                let params: Vec<Param> = params
                    .iter()
                    .map(|p| Param {
                        label: p.label,
                        ty: self.resolve_annotation(&p.ty, span),
                    })
                    .collect();
                let ret = self.resolve_annotation(ret, span);
                self.pool.function(params, ret, *throws)
            }
        }
    }
}
