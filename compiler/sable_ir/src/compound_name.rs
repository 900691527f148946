//! Compound names: a base name plus its full argument-label sequence.
//!
//! `f(a:b:)` names exactly the overload of `f` whose parameters are labeled
//! `a` and `b`, without supplying argument types. An unlabeled parameter is
//! spelled `_`, as in `f(_:b:)`.

use std::fmt::Write as _;

use crate::{Name, StringLookup};

/// A declaration's base name together with its ordered label sequence.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CompoundName {
    /// The base name (`f` in `f(a:b:)`).
    pub base: Name,
    /// One entry per parameter; `None` for an unlabeled parameter.
    pub labels: Box<[Option<Name>]>,
}

impl CompoundName {
    /// Create a compound name.
    pub fn new(base: Name, labels: impl Into<Box<[Option<Name>]>>) -> Self {
        CompoundName {
            base,
            labels: labels.into(),
        }
    }

    /// Number of parameters this name selects.
    pub fn arity(&self) -> usize {
        self.labels.len()
    }

    /// Check whether a parameter label list matches this name exactly.
    pub fn matches_labels<'a>(&self, labels: impl IntoIterator<Item = &'a Option<Name>>) -> bool {
        let mut theirs = labels.into_iter();
        for ours in self.labels.iter() {
            match theirs.next() {
                Some(label) if label == ours => {}
                _ => return false,
            }
        }
        theirs.next().is_none()
    }

    /// Render as `base(a:b:)`.
    pub fn display(&self, names: &impl StringLookup) -> String {
        let mut out = String::from(names.lookup(self.base));
        out.push('(');
        out.push_str(&format_labels(&self.labels, names));
        out.push(')');
        out
    }
}

/// Render a label sequence as `a:b:` (with `_:` for unlabeled slots).
pub fn format_labels(labels: &[Option<Name>], names: &impl StringLookup) -> String {
    let mut out = String::new();
    for label in labels {
        match label {
            Some(name) => {
                let _ = write!(out, "{}:", names.lookup(*name));
            }
            None => out.push_str("_:"),
        }
    }
    out
}
