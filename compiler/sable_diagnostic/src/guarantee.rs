//! Type-level proof that an error was emitted.

use std::fmt;

/// Proof that at least one error diagnostic was emitted.
///
/// Only the diagnostic queue (or an explicit error count) can produce one,
/// so a function returning `Result<_, ErrorGuaranteed>` cannot fail
/// silently.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Produce a guarantee from a count of already-reported errors.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
