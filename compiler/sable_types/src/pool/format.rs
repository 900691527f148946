//! Type formatting for error messages and debugging.
//!
//! Function types render the way they are written in source:
//! `(Int, Int) -> Int`, `(a: Int, b: Int) -> Int`,
//! `(Int, Int) throws -> Int`, and curried `(S0) -> (Int, Int) -> Int`.

use sable_ir::StringLookup;

use super::{Pool, TypeData};
use crate::Idx;

impl Pool {
    /// Format a type as a human-readable string.
    pub fn format_type(&self, idx: Idx, names: &impl StringLookup) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, names, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, idx: Idx, names: &impl StringLookup, buf: &mut String) {
        if let Some(name) = idx.name() {
            buf.push_str(name);
            return;
        }
        if idx.is_none() {
            buf.push_str("<none>");
            return;
        }

        match self.data(idx) {
            TypeData::Int => buf.push_str("Int"),
            TypeData::Double => buf.push_str("Double"),
            TypeData::Bool => buf.push_str("Bool"),
            TypeData::String => buf.push_str("String"),
            TypeData::Unit => buf.push_str("()"),
            TypeData::Error => buf.push_str("<<error type>>"),
            TypeData::Nominal(name) => buf.push_str(names.lookup(name)),
            TypeData::Function(sig) => {
                buf.push('(');
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    if let Some(label) = param.label {
                        buf.push_str(names.lookup(label));
                        buf.push_str(": ");
                    }
                    self.format_type_into(param.ty, names, buf);
                }
                buf.push(')');
                if sig.throws {
                    buf.push_str(" throws");
                }
                buf.push_str(" -> ");
                self.format_type_into(sig.ret, names, buf);
            }
        }
    }
}
