//! Sable Types - name binding and type assignment for function references.
//!
//! Answers one question for every reference to a callable entity: what
//! type does it receive, and do its argument labels survive in that type?
//!
//! Pipeline per reference expression:
//!
//! ```text
//! bind (decl table) → classify (label policy) → assign (pool) → resolve against context
//! ```
//!
//! - [`DeclTable`]: frozen table of functions, methods, initializers and
//!   subscripts, grouped into overload sets.
//! - [`Checker::bind_reference`]: reference expression → candidate set.
//! - [`classify`]: syntactic form → [`LabelPolicy`].
//! - [`assign`](assign::assign): candidate set → [`Assigned`], curried and
//!   label-erased as the policy requires.
//! - [`Checker`]: per-body driver that also checks direct calls,
//!   subscripts and `try`.
//!
//! # Labels
//!
//! A direct call `f1(a: 1, b: 2)` keeps `f1`'s labels and must supply
//! them. A value reference `let g = f1` gets `(Int, Int) -> Int`. A
//! compound name `f1(a:b:)` uses its labels to select an overload and
//! yields a positional function. Parentheses never matter.

mod bind;
mod check;
mod decl;
mod env;
mod flags;
mod idx;
mod policy;
mod pool;
mod type_error;

pub mod assign;

pub use assign::{Arm, Assigned, ContextError, OverloadSet};
pub use bind::{BindBase, BindError, Binding};
pub use check::{CheckConfig, Checker};
pub use decl::{
    DeclError, DeclId, DeclKind, DeclSpec, DeclTable, DeclTableBuilder, Declaration,
    OverloadGroup,
};
pub use env::{Local, TypeEnv};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use policy::{classify, Classification, LabelPolicy, Position, RefForm};
pub use pool::{FunctionSig, Param, Pool, TypeData};
pub use type_error::{MismatchContext, TypeCheckError, TypeErrorKind};

#[cfg(test)]
mod test_helpers;
