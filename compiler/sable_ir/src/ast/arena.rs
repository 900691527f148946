//! Arena storage for expressions and statements.

use crate::{CallArg, CompoundName, Expr, ExprId, ExprKind, Name, Span, Stmt, StmtId, StmtKind};

/// Contiguous storage for a compilation unit's expressions and statements.
///
/// Filled by an earlier pass (or directly by tests through the allocation
/// helpers below), then only read during analysis.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` expressions.
    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX entries"));
        self.exprs.push(Expr::new(kind, span));
        ExprId::new(id)
    }

    /// Allocate a statement.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` statements.
    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let id = u32::try_from(self.stmts.len())
            .unwrap_or_else(|_| panic!("statement arena exceeded u32::MAX entries"));
        self.stmts.push(Stmt::new(kind, span));
        StmtId::new(id)
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.index()].kind
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.exprs[id.index()].span
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Strip every level of redundant parentheses around `id`.
    ///
    /// `((f1))` and `f1` normalize to the same node.
    pub fn skip_parens(&self, mut id: ExprId) -> ExprId {
        while let ExprKind::Paren(inner) = self.kind(id) {
            id = *inner;
        }
        id
    }

    // Allocation helpers, mirroring the surface syntax.

    pub fn int(&mut self, value: i64, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Int(value), span)
    }

    pub fn float(&mut self, value: f64, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Float(value.to_bits()), span)
    }

    pub fn ident(&mut self, name: Name, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Ident(name), span)
    }

    pub fn member(&mut self, base: ExprId, member: Name, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Member { base, member }, span)
    }

    pub fn compound(&mut self, base: Option<ExprId>, name: CompoundName, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Compound { base, name }, span)
    }

    /// Wrap `inner` in `depth` levels of parentheses.
    pub fn parens(&mut self, mut inner: ExprId, depth: usize) -> ExprId {
        for _ in 0..depth {
            let span = self.span(inner);
            inner = self.alloc_expr(ExprKind::Paren(inner), span);
        }
        inner
    }

    pub fn call(&mut self, callee: ExprId, args: Vec<CallArg>, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Call { callee, args }, span)
    }

    pub fn subscript(&mut self, base: ExprId, args: Vec<CallArg>, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Subscript { base, args }, span)
    }

    pub fn try_expr(&mut self, inner: ExprId, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Try(inner), span)
    }
}
