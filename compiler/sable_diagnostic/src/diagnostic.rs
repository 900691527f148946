//! The error record every checking phase produces.
//!
//! A [`Diagnostic`] is always an error: nothing in this compiler emits
//! warnings. Rendering it to a terminal is left to the caller.

use sable_ir::Span;

use crate::ErrorCode;

/// A highlighted source range and the text shown next to it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// `true` for the range the error is reported at, `false` for ranges
    /// that only give context (e.g. a previous declaration).
    pub is_primary: bool,
}

/// One reported error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic must be queued or returned"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub labels: Vec<Label>,
    /// Extra facts about the error, such as the candidates considered.
    pub notes: Vec<String>,
    /// Edits that would make the program check.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Mark `span` as where the error happened.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message.into(), true)
    }

    /// Point at a related range, e.g. the declaration a duplicate clashes
    /// with.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.push_label(span, message.into(), false)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    fn push_label(mut self, span: Span, message: String, is_primary: bool) -> Self {
        self.labels.push(Label {
            span,
            message,
            is_primary,
        });
        self
    }

    /// Where the error is reported; `None` until a primary label is added.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find_map(|label| label.is_primary.then_some(label.span))
    }
}
