//! Flat AST for reference expressions and the statements that host them.
//!
//! Only the expression forms the reference-typing passes care about exist
//! here: bare and qualified references, compound names, parentheses, direct
//! calls, subscripts, `try`, literals. Everything is stored in an
//! [`ExprArena`] and addressed by [`ExprId`] / [`StmtId`].

mod arena;
mod expr;
mod parsed_type;
mod stmt;

pub use arena::ExprArena;
pub use expr::{CallArg, Expr, ExprId, ExprKind};
pub use parsed_type::{ParsedParam, ParsedType};
pub use stmt::{Stmt, StmtId, StmtKind};
