//! Statement nodes.
//!
//! Statements are the recovery boundary of the checker: an error inside one
//! statement never stops analysis of the next.

use std::fmt;

use crate::{ExprId, Name, ParsedType, Span, Spanned};

/// Index into the statement arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    /// Create a new `StmtId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Expression statement: `expr`
    Expr(ExprId),

    /// Discarding assignment: `_ = expr`
    Discard(ExprId),

    /// Binding: `let name: ty = init` / `var name = init`.
    ///
    /// `name` is `None` for the wildcard pattern `let _ = ...`.
    Let {
        name: Option<Name>,
        ty: Option<ParsedType>,
        init: ExprId,
        mutable: bool,
    },

    /// Assignment through an lvalue: `s0Var[a: a, b: b] = a`
    Assign { target: ExprId, value: ExprId },
}
