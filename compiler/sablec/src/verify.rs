//! Error matching for `compile_fail`-style checks.
//!
//! An [`ExpectedError`] names what a diagnostic must look like: a message
//! substring, an error code, a primary span, or any combination. Each
//! expectation consumes at most one diagnostic.

use sable_diagnostic::{Diagnostic, ErrorCode};
use sable_ir::Span;

/// One expected diagnostic. Unset fields match anything.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ExpectedError {
    pub message: Option<String>,
    pub code: Option<ErrorCode>,
    pub span: Option<Span>,
}

impl ExpectedError {
    /// Expect a diagnostic whose message contains `message`.
    pub fn message(message: impl Into<String>) -> Self {
        ExpectedError {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Result of matching diagnostics against expectations.
#[derive(Debug)]
pub struct MatchResult {
    /// Expectations that were matched by actual diagnostics.
    pub matched: Vec<usize>,
    /// Expectations that were not matched.
    pub unmatched_expectations: Vec<usize>,
    /// Actual diagnostics that didn't match any expectation.
    pub unmatched_errors: Vec<usize>,
}

impl MatchResult {
    /// Check if all expectations were matched.
    pub fn all_matched(&self) -> bool {
        self.unmatched_expectations.is_empty()
    }

    /// All expectations matched and no diagnostic was left over.
    pub fn is_exact(&self) -> bool {
        self.all_matched() && self.unmatched_errors.is_empty()
    }

    /// Describe every unmatched expectation and leftover diagnostic.
    pub fn report(&self, actual: &[Diagnostic], expected: &[ExpectedError]) -> String {
        let mut lines = Vec::new();
        for &i in &self.unmatched_expectations {
            lines.push(format!("missing: {}", format_expected(&expected[i])));
        }
        for &i in &self.unmatched_errors {
            let diag = &actual[i];
            lines.push(format!("unexpected: [{}] {}", diag.code, diag.message));
        }
        lines.join("\n")
    }
}

/// Match actual diagnostics against expected error specifications.
pub fn match_errors(actual: &[Diagnostic], expected: &[ExpectedError]) -> MatchResult {
    let mut matched = Vec::new();
    let mut error_matched = vec![false; actual.len()];

    for (exp_idx, exp) in expected.iter().enumerate() {
        let hit = actual
            .iter()
            .enumerate()
            .find(|&(i, diag)| !error_matched[i] && matches_expected(diag, exp));
        if let Some((err_idx, _)) = hit {
            matched.push(exp_idx);
            error_matched[err_idx] = true;
        }
    }

    let unmatched_expectations: Vec<usize> = (0..expected.len())
        .filter(|i| !matched.contains(i))
        .collect();
    let unmatched_errors: Vec<usize> = error_matched
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| (!m).then_some(i))
        .collect();

    MatchResult {
        matched,
        unmatched_expectations,
        unmatched_errors,
    }
}

/// Check if a diagnostic matches an expected specification.
pub fn matches_expected(actual: &Diagnostic, expected: &ExpectedError) -> bool {
    if let Some(msg) = &expected.message {
        if !actual.message.contains(msg.as_str()) {
            return false;
        }
    }
    if let Some(code) = expected.code {
        if actual.code != code {
            return false;
        }
    }
    if let Some(span) = expected.span {
        if actual.primary_span() != Some(span) {
            return false;
        }
    }
    true
}

/// Format an `ExpectedError` for display in failure reports.
pub fn format_expected(expected: &ExpectedError) -> String {
    let mut parts = Vec::new();

    if let Some(msg) = &expected.message {
        parts.push(format!("message contains '{msg}'"));
    }
    if let Some(code) = expected.code {
        parts.push(format!("code = {code}"));
    }
    if let Some(span) = expected.span {
        parts.push(format!("span = {}..{}", span.start, span.end));
    }

    if parts.is_empty() {
        "(any error)".to_string()
    } else {
        parts.join(", ")
    }
}
