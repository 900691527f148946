//! Local variable bindings of one body.

use rustc_hash::FxHashMap;
use sable_ir::{Name, Span};

use crate::Idx;

/// A local binding (`let`/`var`, or a function parameter).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Local {
    pub ty: Idx,
    pub mutable: bool,
    pub span: Span,
}

/// Locals visible in a body. A later binding of the same name shadows the
/// earlier one.
#[derive(Clone, Debug, Default)]
pub struct TypeEnv {
    locals: FxHashMap<Name, Local>,
}

impl TypeEnv {
    pub fn new() -> Self {
        TypeEnv::default()
    }

    pub fn bind(&mut self, name: Name, local: Local) {
        self.locals.insert(name, local);
    }

    pub fn lookup(&self, name: Name) -> Option<&Local> {
        self.locals.get(&name)
    }
}
