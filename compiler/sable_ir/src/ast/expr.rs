//! Expression nodes.

use std::fmt;

use crate::{CompoundName, Name, Span, Spanned};

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Labeled argument at a call or subscript site.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallArg {
    /// Argument label, `None` for a positional argument.
    pub label: Option<Name>,
    pub value: ExprId,
    pub span: Span,
}

impl CallArg {
    /// A positional (unlabeled) argument.
    pub fn positional(value: ExprId, span: Span) -> Self {
        CallArg {
            label: None,
            value,
            span,
        }
    }

    /// A labeled argument `label: value`.
    pub fn labeled(label: Name, value: ExprId, span: Span) -> Self {
        CallArg {
            label: Some(label),
            value,
            span,
        }
    }
}

impl Spanned for CallArg {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: `42`
    Int(i64),
    /// Floating-point literal, stored as bits for `Hash`: `1.5`
    Float(u64),
    /// Boolean literal
    Bool(bool),

    /// Bare identifier: `f1`, `a`, `S0`, `TestModule`
    Ident(Name),

    /// Member access: `s0.f1`, `S0.init`, `TestModule.f4`
    Member { base: ExprId, member: Name },

    /// Compound-name access: `f1(a:b:)`, `s0.f4(c:d:)`, `S0.init(a:b:)`
    Compound {
        base: Option<ExprId>,
        name: CompoundName,
    },

    /// One level of redundant parentheses: `(f1)`
    Paren(ExprId),

    /// Direct call: `callee(label: arg, ...)`
    Call { callee: ExprId, args: Vec<CallArg> },

    /// Subscript access: `base[label: arg, ...]`
    Subscript { base: ExprId, args: Vec<CallArg> },

    /// `try expr`
    Try(ExprId),

    /// Placeholder for an expression that failed to parse.
    Error,
}

impl ExprKind {
    /// Check if this is one of the reference forms (as opposed to a call,
    /// literal, or other expression).
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ExprKind::Ident(_) | ExprKind::Member { .. } | ExprKind::Compound { .. }
        )
    }
}
