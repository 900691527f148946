//! Sable reference checker driver.
//!
//! A [`CompilationUnit`] bundles everything one checking run needs: the
//! interner, the type pool, the frozen declaration table and the expression
//! arena, plus the bodies to check.
//!
//! ```text
//! DeclTableBuilder ──► DeclTable ─┐
//!                                  ├─► CompilationUnit::check ──► CheckOutcome
//! ExprArena + bodies ─────────────┘        (one Checker per body, in parallel)
//! ```
//!
//! Bodies are independent, so they are checked on the rayon pool and their
//! errors merged in body order before being rendered into diagnostics.
//!
//! [`verify`] matches rendered diagnostics against expectations, the way
//! `compile_fail` tests state which errors a body must produce.

mod session;
pub mod verify;

use std::sync::Once;

pub use session::{Body, BodyParam, CheckOutcome, CompilationUnit, SessionConfig};

pub use sable_diagnostic::{Diagnostic, DiagnosticConfig, ErrorCode};
pub use sable_types::CheckConfig;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only the first call has any
/// effect.
///
/// ```bash
/// RUST_LOG=sable_types=trace cargo test -p sablec
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
