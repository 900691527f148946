//! Diagnostic system for structured error reporting.
//!
//! Every diagnostic carries:
//! - An error code for searchability
//! - A message (what went wrong)
//! - A primary span (where it went wrong)
//! - Optional context labels, notes and suggestions
//!
//! Rendering to a terminal is the caller's concern; this crate only owns the
//! structured payload and the queue that orders and limits it.
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that at least one error was
//! emitted:
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn check_unit() -> Result<CheckedUnit, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
