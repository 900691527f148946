//! Type assignment for function references.
//!
//! Turns a bound candidate set into the type a reference expression
//! receives:
//! - a type-qualified instance method is curried over its owner,
//!   `(S0) -> (Int, Int) -> Int`;
//! - labels are erased at every curry level when the label policy says so;
//! - a candidate set with more than one arm stays [`Assigned::Deferred`]
//!   until a contextual type selects exactly one arm.

use sable_ir::Name;
use smallvec::SmallVec;

use crate::{
    BindBase, CheckConfig, Classification, DeclId, DeclKind, DeclTable, Declaration, Idx, Pool,
};

/// One member of an overload set, with the type it would be assigned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Arm {
    /// Source declaration, `None` for arms produced by calling a value.
    pub decl: Option<DeclId>,
    pub ty: Idx,
}

/// Overload set whose arm is not chosen yet.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OverloadSet {
    pub name: Name,
    pub arms: SmallVec<[Arm; 2]>,
}

impl OverloadSet {
    pub fn types(&self) -> Vec<Idx> {
        self.arms.iter().map(|arm| arm.ty).collect()
    }
}

/// Type assigned to an expression.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Assigned {
    Resolved(Idx),
    /// Polymorphic over several arms until a context picks one.
    Deferred(OverloadSet),
}

impl Assigned {
    pub fn resolved(&self) -> Option<Idx> {
        match self {
            Assigned::Resolved(ty) => Some(*ty),
            Assigned::Deferred(_) => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Assigned::Deferred(_))
    }

    /// Arms of this assignment; a resolved type is a single anonymous arm.
    pub fn arms(&self) -> SmallVec<[Arm; 2]> {
        match self {
            &Assigned::Resolved(ty) => smallvec::smallvec![Arm { decl: None, ty }],
            Assigned::Deferred(set) => set.arms.clone(),
        }
    }

    /// Apply `f` to every arm's type.
    #[must_use]
    pub fn map_types(self, mut f: impl FnMut(Idx) -> Idx) -> Self {
        match self {
            Assigned::Resolved(ty) => Assigned::Resolved(f(ty)),
            Assigned::Deferred(mut set) => {
                for arm in &mut set.arms {
                    arm.ty = f(arm.ty);
                }
                Assigned::Deferred(set)
            }
        }
    }

    /// Collapse arms into a single type when there is only one.
    pub fn from_arms(name: Name, arms: SmallVec<[Arm; 2]>) -> Self {
        match arms.as_slice() {
            [] => Assigned::Resolved(Idx::ERROR),
            [arm] => Assigned::Resolved(arm.ty),
            _ => Assigned::Deferred(OverloadSet { name, arms }),
        }
    }
}

/// Type of a declaration as seen through `base`, with labels intact.
///
/// Instance methods reached through their type are curried over the owner;
/// the outer level never throws and never has labels.
pub fn decl_type(pool: &Pool, decl: &Declaration, base: BindBase) -> Idx {
    let sig = decl.signature();
    let inner = pool.function(sig.params, sig.ret, sig.throws);
    match (decl.kind, base) {
        (DeclKind::Method, BindBase::TypeQualified(owner)) => {
            pool.positional_function(&[owner], inner)
        }
        _ => inner,
    }
}

/// Assign a type to a reference bound to `candidates`.
pub fn assign(
    pool: &Pool,
    table: &DeclTable,
    name: Name,
    candidates: &[DeclId],
    base: BindBase,
    class: Classification,
    config: &CheckConfig,
) -> Assigned {
    let erase = class.erases_labels(config);
    let arms: SmallVec<[Arm; 2]> = candidates
        .iter()
        .map(|&id| {
            let ty = decl_type(pool, table.get(id), base);
            Arm {
                decl: Some(id),
                ty: if erase { pool.erase_labels(ty) } else { ty },
            }
        })
        .collect();

    if arms.len() > 1 {
        tracing::debug!(?name, arms = arms.len(), ?class, "deferring overload set");
    }
    Assigned::from_arms(name, arms)
}

/// Why a contextual type could not be satisfied.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ContextError {
    /// A resolved type that does not convert to the context.
    Mismatch { found: Idx },
    /// No arm of the set converts to the context.
    NoArm(OverloadSet),
    /// Several arms convert; the set keeps only those.
    Ambiguous(OverloadSet),
}

/// Check an assigned type against a contextual type.
///
/// For a deferred set, exactly one compatible arm is selected. Labels are
/// ignored on both sides.
pub fn resolve_contextual(
    pool: &Pool,
    assigned: Assigned,
    expected: Idx,
) -> Result<Idx, ContextError> {
    match assigned {
        Assigned::Resolved(found) => {
            if pool.convertible(found, expected) {
                Ok(found)
            } else {
                Err(ContextError::Mismatch { found })
            }
        }
        Assigned::Deferred(set) => {
            if pool.has_error(expected) {
                return Ok(Idx::ERROR);
            }
            let compatible: SmallVec<[Arm; 2]> = set
                .arms
                .iter()
                .copied()
                .filter(|arm| pool.convertible(arm.ty, expected))
                .collect();
            match compatible.as_slice() {
                [arm] => {
                    tracing::debug!(
                        name = ?set.name,
                        decl = ?arm.decl,
                        "selected overload by context"
                    );
                    Ok(arm.ty)
                }
                [] => Err(ContextError::NoArm(set)),
                _ => Err(ContextError::Ambiguous(OverloadSet {
                    name: set.name,
                    arms: compatible,
                })),
            }
        }
    }
}
