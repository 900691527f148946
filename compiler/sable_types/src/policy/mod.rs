//! Label-suppression policy.
//!
//! Decides from a reference's syntactic form alone whether argument labels
//! stay in the type it is assigned. Redundant parentheses are normalized
//! away first, so `f1`, `(f1)` and `((f1))` always classify the same way.
//! The overload's signature and the contextual type never affect the
//! decision.

use sable_ir::{ExprArena, ExprId, ExprKind};

use crate::CheckConfig;

/// Where a reference appears.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Position {
    /// Used as a value: bound, passed, returned, compared.
    Value,
    /// The callee of a direct call.
    Callee,
}

/// Syntactic form of a reference, after stripping parentheses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RefForm {
    /// `f1`
    Bare,
    /// `s0.f1`, `S0.f1`, `S0.init`, `TestModule.f1`
    Member,
    /// `f1(a:b:)`, `S0.f1(a:b:)`
    Compound,
    /// Anything else (call results, literals).
    Other,
}

/// Whether labels participate in a reference's type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelPolicy {
    Retain,
    Suppress,
}

/// Outcome of classifying one reference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Classification {
    pub form: RefForm,
    pub position: Position,
    pub policy: LabelPolicy,
}

impl Classification {
    /// Whether labels must be erased from the assigned type under `config`.
    ///
    /// With suppression disabled, value references keep their labels;
    /// compound-name results are positional regardless.
    pub fn erases_labels(self, config: &CheckConfig) -> bool {
        if self.form == RefForm::Compound {
            return true;
        }
        config.suppress_argument_labels && self.policy == LabelPolicy::Suppress
    }
}

/// Classify the reference `expr` appearing at `position`.
pub fn classify(arena: &ExprArena, expr: ExprId, position: Position) -> Classification {
    let form = match arena.kind(arena.skip_parens(expr)) {
        ExprKind::Ident(_) => RefForm::Bare,
        ExprKind::Member { .. } => RefForm::Member,
        ExprKind::Compound { .. } => RefForm::Compound,
        _ => RefForm::Other,
    };
    let policy = match (form, position) {
        (RefForm::Compound, _) | (_, Position::Callee) => LabelPolicy::Retain,
        (_, Position::Value) => LabelPolicy::Suppress,
    };
    Classification {
        form,
        position,
        policy,
    }
}
