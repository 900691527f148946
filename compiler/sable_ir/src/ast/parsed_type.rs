//! Parsed type annotations.
//!
//! `ParsedType` keeps an annotation exactly as written, including argument
//! labels inside function types (`(x: Int, y: Int) -> Int`). The type
//! checker resolves it into a pool type.

use crate::Name;

/// A parsed type expression, preserving full structure.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedType {
    /// A nominal or builtin type name: `Int`, `Double`, `S0`
    Named(Name),

    /// The empty tuple `()`.
    Unit,

    /// A function type: `(x: Int, y: Int) throws -> Int`
    Function {
        params: Vec<ParsedParam>,
        throws: bool,
        ret: Box<ParsedType>,
    },
}

/// One parameter slot in a parsed function type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedParam {
    /// Label written in the annotation, if any.
    pub label: Option<Name>,
    pub ty: ParsedType,
}

impl ParsedType {
    /// Build an unlabeled function type annotation.
    pub fn function(params: Vec<ParsedType>, ret: ParsedType) -> Self {
        ParsedType::Function {
            params: params
                .into_iter()
                .map(|ty| ParsedParam { label: None, ty })
                .collect(),
            throws: false,
            ret: Box::new(ret),
        }
    }

    /// Build a function type annotation with labeled parameters.
    pub fn labeled_function(params: Vec<(Name, ParsedType)>, ret: ParsedType) -> Self {
        ParsedType::Function {
            params: params
                .into_iter()
                .map(|(label, ty)| ParsedParam {
                    label: Some(label),
                    ty,
                })
                .collect(),
            throws: false,
            ret: Box::new(ret),
        }
    }

    /// Check whether any function parameter in this annotation carries a label.
    pub fn has_labels(&self) -> bool {
        match self {
            ParsedType::Named(_) | ParsedType::Unit => false,
            ParsedType::Function { params, ret, .. } => {
                params
                    .iter()
                    .any(|p| p.label.is_some() || p.ty.has_labels())
                    || ret.has_labels()
            }
        }
    }
}
