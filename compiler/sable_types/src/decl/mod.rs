//! Declaration table.
//!
//! Records every function, method, initializer and subscript visible to a
//! compilation unit, grouped into overload sets by owner and base name.
//! Built once through [`DeclTableBuilder`], then frozen: analysis only
//! reads it, so one table is shared by every checker.

use rustc_hash::FxHashMap;
use sable_ir::{CompoundName, Name, Span, StringInterner};
use smallvec::SmallVec;

use crate::{FunctionSig, Idx, Param, Pool};

/// Index of a declaration in its table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of an overload set: every declaration sharing an owner and a
/// base name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct OverloadGroup(u32);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    /// Free function.
    Function,
    /// Instance method.
    Method,
    Initializer,
    Subscript,
}

/// A declared callable entity.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Declaration {
    pub id: DeclId,
    /// Base name (`f1`, `init`, `subscript`).
    pub name: Name,
    pub kind: DeclKind,
    pub params: Box<[Param]>,
    /// Return type (the owner type for initializers).
    pub ret: Idx,
    pub throws: bool,
    /// `None` for free functions.
    pub owner: Option<Idx>,
    pub group: OverloadGroup,
    /// Subscripts only: a setter exists.
    pub settable: bool,
    pub span: Span,
}

impl Declaration {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn labels(&self) -> impl Iterator<Item = &Option<Name>> {
        self.params.iter().map(|p| &p.label)
    }

    /// The name that selects exactly this declaration's label sequence.
    pub fn compound_name(&self) -> CompoundName {
        CompoundName::new(self.name, self.labels().copied().collect::<Vec<_>>())
    }

    /// The uncurried signature, labels included.
    pub fn signature(&self) -> FunctionSig {
        FunctionSig {
            params: self.params.clone(),
            ret: self.ret,
            throws: self.throws,
        }
    }
}

/// Everything needed to add one declaration to a table.
#[derive(Clone, Debug)]
pub struct DeclSpec {
    name: DeclName,
    kind: DeclKind,
    owner: Option<Idx>,
    params: Box<[Param]>,
    ret: Idx,
    throws: bool,
    settable: bool,
    span: Span,
}

/// Initializers and subscripts take their base name from the table.
#[derive(Copy, Clone, Debug)]
enum DeclName {
    Named(Name),
    Init,
    Subscript,
}

impl DeclSpec {
    /// A free function.
    pub fn function(name: Name, params: impl Into<Box<[Param]>>, ret: Idx) -> Self {
        Self::new(DeclName::Named(name), DeclKind::Function, None, params, ret)
    }

    /// An instance method of `owner`.
    pub fn method(owner: Idx, name: Name, params: impl Into<Box<[Param]>>, ret: Idx) -> Self {
        Self::new(
            DeclName::Named(name),
            DeclKind::Method,
            Some(owner),
            params,
            ret,
        )
    }

    /// An initializer of `owner`; it returns the owner type.
    pub fn initializer(owner: Idx, params: impl Into<Box<[Param]>>) -> Self {
        Self::new(
            DeclName::Init,
            DeclKind::Initializer,
            Some(owner),
            params,
            owner,
        )
    }

    /// A get-only subscript of `owner`.
    pub fn subscript(owner: Idx, params: impl Into<Box<[Param]>>, ret: Idx) -> Self {
        Self::new(
            DeclName::Subscript,
            DeclKind::Subscript,
            Some(owner),
            params,
            ret,
        )
    }

    fn new(
        name: DeclName,
        kind: DeclKind,
        owner: Option<Idx>,
        params: impl Into<Box<[Param]>>,
        ret: Idx,
    ) -> Self {
        DeclSpec {
            name,
            kind,
            owner,
            params: params.into(),
            ret,
            throws: false,
            settable: false,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn throwing(mut self) -> Self {
        self.throws = true;
        self
    }

    /// Give a subscript a setter.
    #[must_use]
    pub fn settable(mut self) -> Self {
        self.settable = true;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Errors raised while building a declaration table.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum DeclError {
    #[error("invalid redeclaration of '{name}'")]
    Duplicate {
        /// Rendered compound name of the redeclared entity.
        name: String,
        span: Span,
        previous: Span,
    },

    #[error("members can only be declared on a declared nominal type")]
    InvalidOwner { span: Span },
}

impl DeclError {
    pub fn span(&self) -> Span {
        match self {
            DeclError::Duplicate { span, .. } | DeclError::InvalidOwner { span } => *span,
        }
    }
}

type DeclList = SmallVec<[DeclId; 4]>;

/// Frozen table of declarations.
#[derive(Clone, Debug)]
pub struct DeclTable {
    decls: Vec<Declaration>,
    free: FxHashMap<Name, DeclList>,
    /// Methods and initializers, by `(owner, base name)`.
    members: FxHashMap<(Idx, Name), DeclList>,
    subscripts: FxHashMap<Idx, DeclList>,
    types: FxHashMap<Name, Idx>,
    module: Option<Name>,
    init_name: Name,
}

impl DeclTable {
    #[inline]
    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.decls.iter()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Free functions named `name`.
    pub fn lookup(&self, name: Name) -> &[DeclId] {
        self.free.get(&name).map_or(&[][..], |list| list.as_slice())
    }

    /// Instance methods of `owner` named `name`.
    pub fn lookup_member(&self, owner: Idx, name: Name) -> &[DeclId] {
        if name == self.init_name {
            return &[];
        }
        self.members
            .get(&(owner, name))
            .map_or(&[][..], |list| list.as_slice())
    }

    pub fn initializers(&self, owner: Idx) -> &[DeclId] {
        self.members
            .get(&(owner, self.init_name))
            .map_or(&[][..], |list| list.as_slice())
    }

    pub fn subscripts(&self, owner: Idx) -> &[DeclId] {
        self.subscripts
            .get(&owner)
            .map_or(&[][..], |list| list.as_slice())
    }

    /// Declarations whose base name and full label sequence match `name`.
    ///
    /// With an owner, `init(...)` selects initializers and any other base
    /// selects methods; without one, free functions.
    pub fn lookup_compound(
        &self,
        owner: Option<Idx>,
        name: &CompoundName,
    ) -> SmallVec<[DeclId; 2]> {
        let candidates = match owner {
            Some(owner) if name.base == self.init_name => self.initializers(owner),
            Some(owner) => self.lookup_member(owner, name.base),
            None => self.lookup(name.base),
        };
        candidates
            .iter()
            .copied()
            .filter(|&id| name.matches_labels(self.get(id).labels()))
            .collect()
    }

    /// Nominal type declared under `name`.
    pub fn lookup_type(&self, name: Name) -> Option<Idx> {
        self.types.get(&name).copied()
    }

    /// Name of the module being compiled, for module-qualified references.
    pub fn module_name(&self) -> Option<Name> {
        self.module
    }

    /// The base name shared by initializers.
    pub fn init_name(&self) -> Name {
        self.init_name
    }
}

/// Builder for a [`DeclTable`].
pub struct DeclTableBuilder<'a> {
    pool: &'a Pool,
    names: &'a StringInterner,
    table: DeclTable,
    groups: FxHashMap<(Option<Idx>, Name), OverloadGroup>,
    subscript_name: Name,
}

impl<'a> DeclTableBuilder<'a> {
    pub fn new(pool: &'a Pool, names: &'a StringInterner) -> Self {
        DeclTableBuilder {
            pool,
            names,
            table: DeclTable {
                decls: Vec::new(),
                free: FxHashMap::default(),
                members: FxHashMap::default(),
                subscripts: FxHashMap::default(),
                types: FxHashMap::default(),
                module: None,
                init_name: names.intern("init"),
            },
            groups: FxHashMap::default(),
            subscript_name: names.intern("subscript"),
        }
    }

    /// Set the name of the module being compiled.
    #[must_use]
    pub fn module(mut self, name: Name) -> Self {
        self.table.module = Some(name);
        self
    }

    /// Declare a nominal type and return its pool index.
    pub fn declare_type(&mut self, name: Name) -> Idx {
        let idx = self.pool.nominal(name);
        self.table.types.insert(name, idx);
        idx
    }

    /// Add a declaration to its overload set.
    ///
    /// An exact redeclaration (same owner, kind, labels, parameter types and
    /// return type) is rejected.
    pub fn declare(&mut self, spec: DeclSpec) -> Result<DeclId, DeclError> {
        if let Some(owner) = spec.owner {
            let declared = self
                .pool
                .nominal_name(owner)
                .is_some_and(|n| self.table.types.get(&n) == Some(&owner));
            if !declared {
                return Err(DeclError::InvalidOwner { span: spec.span });
            }
        }

        let name = match spec.name {
            DeclName::Named(name) => name,
            DeclName::Init => self.table.init_name,
            DeclName::Subscript => self.subscript_name,
        };

        if let Some(previous) = self.find_duplicate(&spec, name) {
            let rendered = CompoundName::new(
                name,
                spec.params.iter().map(|p| p.label).collect::<Vec<_>>(),
            )
            .display(self.names);
            return Err(DeclError::Duplicate {
                name: rendered,
                span: spec.span,
                previous,
            });
        }

        let raw = u32::try_from(self.table.decls.len())
            .unwrap_or_else(|_| panic!("declaration table exceeded u32::MAX entries"));
        let id = DeclId(raw);

        let next_group = u32::try_from(self.groups.len())
            .unwrap_or_else(|_| panic!("declaration table exceeded u32::MAX overload groups"));
        let group = *self
            .groups
            .entry((spec.owner, name))
            .or_insert(OverloadGroup(next_group));

        match (spec.kind, spec.owner) {
            (DeclKind::Subscript, Some(owner)) => {
                self.table.subscripts.entry(owner).or_default().push(id);
            }
            (_, Some(owner)) => {
                self.table
                    .members
                    .entry((owner, name))
                    .or_default()
                    .push(id);
            }
            (_, None) => self.table.free.entry(name).or_default().push(id),
        }

        tracing::trace!(?id, name = self.names.lookup(name), kind = ?spec.kind, "declared");
        self.table.decls.push(Declaration {
            id,
            name,
            kind: spec.kind,
            params: spec.params,
            ret: spec.ret,
            throws: spec.throws,
            owner: spec.owner,
            group,
            settable: spec.settable,
            span: spec.span,
        });
        Ok(id)
    }

    fn find_duplicate(&self, spec: &DeclSpec, name: Name) -> Option<Span> {
        let existing = match (spec.kind, spec.owner) {
            (DeclKind::Subscript, Some(owner)) => self.table.subscripts(owner),
            (_, Some(owner)) => self
                .table
                .members
                .get(&(owner, name))
                .map_or(&[][..], |list| list.as_slice()),
            (_, None) => self.table.lookup(name),
        };
        existing
            .iter()
            .map(|&id| self.table.get(id))
            .find(|d| d.kind == spec.kind && d.params == spec.params && d.ret == spec.ret)
            .map(|d| d.span)
    }

    /// Freeze the table.
    pub fn finish(self) -> DeclTable {
        tracing::debug!(decls = self.table.len(), "declaration table built");
        self.table
    }
}
