//! Type checking errors.
//!
//! `TypeCheckError` pairs a span with a [`TypeErrorKind`]. Kinds store
//! interned names and pool indices; rendering a message needs the pool and
//! the interner, so it happens in [`TypeCheckError::message`] rather than
//! through `Display`.

use sable_diagnostic::{Diagnostic, ErrorCode};
use sable_ir::{format_labels, CompoundName, Name, Span, StringInterner};

use crate::{BindError, Idx, Pool};

/// Where a contextual type came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MismatchContext {
    /// `let x: T = ...`
    Annotation,
    /// A call or subscript argument.
    Argument,
    /// The right-hand side of an assignment.
    Assignment,
}

/// A type checking error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeCheckError {
    pub span: Span,
    pub kind: TypeErrorKind,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeErrorKind {
    /// Assigned type is incompatible with the contextual type.
    Mismatch {
        found: Idx,
        expected: Idx,
        context: MismatchContext,
    },

    /// No arm of an overload set fits the contextual type.
    OverloadMismatch {
        name: Name,
        expected: Idx,
        candidates: Vec<Idx>,
    },

    /// An overload set was used where no context can pick one arm.
    AmbiguousReference { name: Name, candidates: Vec<Idx> },

    UnboundName { name: Name },

    /// Compound name whose label sequence matches nothing.
    UnboundCompound {
        name: CompoundName,
        owner: Option<Idx>,
    },

    NoSuchMember {
        owner: Idx,
        member: Name,
        /// Accessed through the type (`S0.g`) rather than a value (`s0.g`).
        on_type: bool,
    },

    NoModuleMember { module: Name, member: Name },

    /// A type or module name used where a value is required.
    NotAValue { name: Name, is_module: bool },

    UnknownType { name: Name },

    /// Direct call whose labels differ from the only candidate's.
    ArgumentLabelMismatch {
        have: Box<[Option<Name>]>,
        expected: Box<[Option<Name>]>,
    },

    /// Labels passed to a function value without any.
    ExtraneousLabels { have: Box<[Option<Name>]> },

    ArityMismatch { expected: usize, found: usize },

    NoMatchingOverload { name: Option<Name> },

    NotCallable { ty: Idx },

    MissingTry,

    SubscriptNotSettable,

    /// Assignment through a subscript whose base is not mutable.
    ImmutableBase { name: Option<Name> },

    /// Assignment to a `let` local.
    ImmutableLocal { name: Name },

    NotAssignable,
}

impl TypeCheckError {
    pub fn new(span: Span, kind: TypeErrorKind) -> Self {
        TypeCheckError { span, kind }
    }

    pub fn mismatch(span: Span, found: Idx, expected: Idx, context: MismatchContext) -> Self {
        Self::new(
            span,
            TypeErrorKind::Mismatch {
                found,
                expected,
                context,
            },
        )
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(
            self.kind,
            TypeErrorKind::Mismatch { .. } | TypeErrorKind::OverloadMismatch { .. }
        )
    }

    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            TypeErrorKind::Mismatch { .. } | TypeErrorKind::OverloadMismatch { .. } => {
                ErrorCode::E2001
            }
            TypeErrorKind::UnknownType { .. } => ErrorCode::E2002,
            TypeErrorKind::UnboundName { .. } | TypeErrorKind::UnboundCompound { .. } => {
                ErrorCode::E2003
            }
            TypeErrorKind::ArityMismatch { .. } => ErrorCode::E2004,
            TypeErrorKind::ArgumentLabelMismatch { .. }
            | TypeErrorKind::ExtraneousLabels { .. } => ErrorCode::E2011,
            TypeErrorKind::AmbiguousReference { .. } => ErrorCode::E2023,
            TypeErrorKind::NoMatchingOverload { .. } => ErrorCode::E2024,
            TypeErrorKind::NotCallable { .. } => ErrorCode::E2025,
            TypeErrorKind::MissingTry => ErrorCode::E2026,
            TypeErrorKind::SubscriptNotSettable
            | TypeErrorKind::ImmutableBase { .. }
            | TypeErrorKind::ImmutableLocal { .. }
            | TypeErrorKind::NotAssignable => ErrorCode::E2027,
            TypeErrorKind::NoSuchMember { .. } | TypeErrorKind::NoModuleMember { .. } => {
                ErrorCode::E2028
            }
            TypeErrorKind::NotAValue { .. } => ErrorCode::E2029,
        }
    }

    /// Render the primary message.
    pub fn message(&self, pool: &Pool, names: &StringInterner) -> String {
        let ty = |idx: Idx| pool.format_type(idx, names);
        match &self.kind {
            TypeErrorKind::Mismatch {
                found,
                expected,
                context,
            } => match context {
                MismatchContext::Annotation => format!(
                    "cannot convert value of type '{}' to specified type '{}'",
                    ty(*found),
                    ty(*expected)
                ),
                MismatchContext::Argument => format!(
                    "cannot convert value of type '{}' to expected argument type '{}'",
                    ty(*found),
                    ty(*expected)
                ),
                MismatchContext::Assignment => format!(
                    "cannot assign value of type '{}' to type '{}'",
                    ty(*found),
                    ty(*expected)
                ),
            },
            TypeErrorKind::OverloadMismatch {
                name,
                expected,
                candidates,
            } => {
                let mut msg = format!(
                    "no '{}' candidates produce the expected contextual type '{}'",
                    names.lookup(*name),
                    ty(*expected)
                );
                if !candidates.is_empty() {
                    let found: Vec<String> = candidates
                        .iter()
                        .map(|&c| format!("'{}'", ty(c)))
                        .collect();
                    msg.push_str(&format!(" (found {})", found.join(", ")));
                }
                msg
            }
            TypeErrorKind::AmbiguousReference { name, .. } => {
                format!("ambiguous use of '{}'", names.lookup(*name))
            }
            TypeErrorKind::UnboundName { name } => {
                format!("cannot find '{}' in scope", names.lookup(*name))
            }
            TypeErrorKind::UnboundCompound { name, owner: None } => {
                format!("cannot find '{}' in scope", name.display(names))
            }
            TypeErrorKind::UnboundCompound {
                name,
                owner: Some(owner),
            } => format!(
                "type '{}' has no member '{}'",
                ty(*owner),
                name.display(names)
            ),
            TypeErrorKind::NoSuchMember {
                owner,
                member,
                on_type,
            } => format!(
                "{} '{}' has no member '{}'",
                if *on_type { "type" } else { "value of type" },
                ty(*owner),
                names.lookup(*member)
            ),
            TypeErrorKind::NoModuleMember { module, member } => format!(
                "module '{}' has no member named '{}'",
                names.lookup(*module),
                names.lookup(*member)
            ),
            TypeErrorKind::NotAValue { name, is_module } => format!(
                "{} '{}' cannot be used as a value",
                if *is_module { "module" } else { "type" },
                names.lookup(*name)
            ),
            TypeErrorKind::UnknownType { name } => {
                format!("cannot find type '{}' in scope", names.lookup(*name))
            }
            TypeErrorKind::ArgumentLabelMismatch { have, expected } => {
                if have.iter().all(Option::is_none) {
                    format!(
                        "missing argument labels '{}' in call",
                        format_labels(expected, names)
                    )
                } else {
                    format!(
                        "incorrect argument labels in call (have '{}', expected '{}')",
                        format_labels(have, names),
                        format_labels(expected, names)
                    )
                }
            }
            TypeErrorKind::ExtraneousLabels { have } => format!(
                "extraneous argument labels '{}' in call",
                format_labels(have, names)
            ),
            TypeErrorKind::ArityMismatch { expected, found } => format!(
                "wrong number of arguments in call: expected {expected}, found {found}"
            ),
            TypeErrorKind::NoMatchingOverload { name: Some(name) } => {
                format!("no exact matches in call to '{}'", names.lookup(*name))
            }
            TypeErrorKind::NoMatchingOverload { name: None } => {
                "no exact matches in call".to_string()
            }
            TypeErrorKind::NotCallable { ty: callee } => format!(
                "cannot call value of non-function type '{}'",
                ty(*callee)
            ),
            TypeErrorKind::MissingTry => "call can throw but is not marked with 'try'".to_string(),
            TypeErrorKind::SubscriptNotSettable => {
                "cannot assign through subscript: subscript is get-only".to_string()
            }
            TypeErrorKind::ImmutableBase { name: Some(name) } => format!(
                "cannot assign through subscript: '{}' is a 'let' constant",
                names.lookup(*name)
            ),
            TypeErrorKind::ImmutableBase { name: None } => {
                "cannot assign through subscript: base is not mutable".to_string()
            }
            TypeErrorKind::ImmutableLocal { name } => format!(
                "cannot assign to value: '{}' is a 'let' constant",
                names.lookup(*name)
            ),
            TypeErrorKind::NotAssignable => "cannot assign to this expression".to_string(),
        }
    }

    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self, pool: &Pool, names: &StringInterner) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.message(pool, names))
            .with_label(self.span, self.label_text());

        match &self.kind {
            TypeErrorKind::OverloadMismatch { candidates, .. }
            | TypeErrorKind::AmbiguousReference { candidates, .. } => {
                for candidate in candidates {
                    diag = diag.with_note(format!(
                        "found candidate of type '{}'",
                        pool.format_type(*candidate, names)
                    ));
                }
            }
            TypeErrorKind::ArgumentLabelMismatch { expected, .. } => {
                diag = diag.with_suggestion(format!(
                    "use the declared labels '{}'",
                    format_labels(expected, names)
                ));
            }
            TypeErrorKind::ExtraneousLabels { .. } => {
                diag = diag.with_suggestion("remove the argument labels");
            }
            TypeErrorKind::MissingTry => {
                diag = diag.with_suggestion("mark the call with 'try'");
            }
            _ => {}
        }
        diag
    }

    fn label_text(&self) -> &'static str {
        match &self.kind {
            TypeErrorKind::Mismatch { .. } | TypeErrorKind::OverloadMismatch { .. } => {
                "type mismatch"
            }
            TypeErrorKind::AmbiguousReference { .. } => "ambiguous reference",
            TypeErrorKind::UnboundName { .. } | TypeErrorKind::UnboundCompound { .. } => {
                "not found in this scope"
            }
            TypeErrorKind::NoSuchMember { .. } | TypeErrorKind::NoModuleMember { .. } => {
                "unknown member"
            }
            TypeErrorKind::NotAValue { .. } => "not a value",
            TypeErrorKind::UnknownType { .. } => "unknown type",
            TypeErrorKind::ArgumentLabelMismatch { .. }
            | TypeErrorKind::ExtraneousLabels { .. } => "argument labels",
            TypeErrorKind::ArityMismatch { .. } => "wrong number of arguments",
            TypeErrorKind::NoMatchingOverload { .. } => "no matching overload",
            TypeErrorKind::NotCallable { .. } => "not callable",
            TypeErrorKind::MissingTry => "throwing call",
            TypeErrorKind::SubscriptNotSettable
            | TypeErrorKind::ImmutableBase { .. }
            | TypeErrorKind::ImmutableLocal { .. }
            | TypeErrorKind::NotAssignable => "not assignable",
        }
    }
}

impl From<BindError> for TypeCheckError {
    fn from(err: BindError) -> Self {
        match err {
            BindError::Unbound { name, span } => {
                TypeCheckError::new(span, TypeErrorKind::UnboundName { name })
            }
            BindError::UnboundCompound { name, owner, span } => {
                TypeCheckError::new(span, TypeErrorKind::UnboundCompound { name, owner })
            }
            BindError::NoSuchMember {
                owner,
                member,
                on_type,
                span,
            } => TypeCheckError::new(
                span,
                TypeErrorKind::NoSuchMember {
                    owner,
                    member,
                    on_type,
                },
            ),
            BindError::NoModuleMember {
                module,
                member,
                span,
            } => TypeCheckError::new(span, TypeErrorKind::NoModuleMember { module, member }),
        }
    }
}
