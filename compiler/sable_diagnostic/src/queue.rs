//! Diagnostic queue for collecting, deduplicating, and ordering diagnostics.
//!
//! Features:
//! - Error limit, with a single trailing "too many errors" diagnostic
//! - Deduplication of identical diagnostics at the same span
//! - Source-order flushing
//! - `ErrorGuaranteed` proof that errors were emitted

use sable_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic identical to one already queued at the same span.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// A config with no limits (for tests and verify runs).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting and ordering diagnostics.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    limit_reported: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a queue with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    /// Create a queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            limit_reported: false,
            config,
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was queued, `false` if it was
    /// filtered by the error limit or deduplication.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            if !self.limit_reported {
                self.limit_reported = true;
                let span = diag.primary_span().unwrap_or(Span::DUMMY);
                self.diagnostics
                    .push(too_many_errors(self.config.error_limit, span));
            }
            return false;
        }

        if self.config.deduplicate && self.diagnostics.contains(&diag) {
            return false;
        }

        self.error_count += 1;
        self.diagnostics.push(diag);
        true
    }

    /// Emit an error diagnostic and get proof it was emitted.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.add(diag);
        ErrorGuaranteed::new()
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Number of errors queued, excluding the "too many errors" marker.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Proof of emitted errors, if any were queued.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Sort diagnostics by primary span and return them, clearing the queue.
    ///
    /// The sort is stable: diagnostics at the same position keep their
    /// emission order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics
            .sort_by_key(|d| d.primary_span().unwrap_or(Span::DUMMY).start);
        self.error_count = 0;
        self.limit_reported = false;
        std::mem::take(&mut self.diagnostics)
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Create a "too many errors" diagnostic.
#[cold]
pub fn too_many_errors(limit: usize, span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting after {limit} errors"))
        .with_label(span, "error limit reached here")
}
