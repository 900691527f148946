//! Sable IR - Intermediate Representation Types
//!
//! This crate contains the core data structures shared by the Sable
//! semantic passes:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Compound names (`f(a:b:)`) for label-based overload selection
//! - A flat arena of reference expressions and statements
//! - Parsed type annotations, before resolution
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//! - **Immutable After Build**: arenas are filled by an earlier pass and only
//!   read during analysis

mod ast;
mod compound_name;
mod interner;
mod name;
mod span;

pub use ast::{
    CallArg, Expr, ExprArena, ExprId, ExprKind, ParsedParam, ParsedType, Stmt, StmtId, StmtKind,
};
pub use compound_name::{format_labels, CompoundName};
pub use interner::{SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::Span;

/// Trait for IR nodes that carry a source location.
pub trait Spanned {
    /// Get the span of this node.
    fn span(&self) -> Span;
}
