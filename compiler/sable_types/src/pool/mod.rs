//! Unified type pool.
//!
//! All types are interned here and referenced by [`Idx`]. The pool is
//! shared by reference across checkers: interning goes through `&self`
//! behind a `parking_lot::RwLock`, so bodies checked on different threads
//! see the same indices for the same types.

mod format;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use sable_ir::Name;

use crate::{Idx, TypeFlags};

/// One parameter slot of a function type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    /// Argument label, `None` for a positional parameter.
    pub label: Option<Name>,
    pub ty: Idx,
}

impl Param {
    pub const fn positional(ty: Idx) -> Self {
        Param { label: None, ty }
    }

    pub const fn labeled(label: Name, ty: Idx) -> Self {
        Param {
            label: Some(label),
            ty,
        }
    }
}

/// Signature of a function type.
///
/// A curried method is a signature whose `ret` is itself a function type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionSig {
    pub params: Box<[Param]>,
    pub ret: Idx,
    pub throws: bool,
}

impl FunctionSig {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Ordered label sequence of the outermost level.
    pub fn labels(&self) -> impl Iterator<Item = &Option<Name>> {
        self.params.iter().map(|p| &p.label)
    }

    /// Check whether any parameter at this level carries a label.
    pub fn has_labels(&self) -> bool {
        self.params.iter().any(|p| p.label.is_some())
    }
}

/// Structural description of an interned type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Int,
    Double,
    Bool,
    String,
    Unit,
    Error,
    /// A user-declared type, by name: `S0`.
    Nominal(Name),
    Function(FunctionSig),
}

#[derive(Default)]
struct PoolInner {
    types: Vec<TypeData>,
    flags: Vec<TypeFlags>,
    map: FxHashMap<TypeData, Idx>,
}

impl PoolInner {
    fn push(&mut self, data: TypeData, flags: TypeFlags) -> Idx {
        let raw = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type pool exceeded u32::MAX entries"));
        let idx = Idx::from_raw(raw);
        self.types.push(data.clone());
        self.flags.push(flags);
        self.map.insert(data, idx);
        idx
    }
}

/// Interning storage for every type of a compilation.
pub struct Pool {
    inner: RwLock<PoolInner>,
}

impl Pool {
    /// Create a pool with the primitive types pre-interned at their fixed
    /// indices.
    pub fn new() -> Self {
        let mut inner = PoolInner::default();
        let primitives = [
            (TypeData::Int, Idx::INT),
            (TypeData::Double, Idx::DOUBLE),
            (TypeData::Bool, Idx::BOOL),
            (TypeData::String, Idx::STRING),
            (TypeData::Unit, Idx::UNIT),
            (TypeData::Error, Idx::ERROR),
        ];
        for (data, expected) in primitives {
            let mut flags = TypeFlags::IS_PRIMITIVE;
            if data == TypeData::Error {
                flags |= TypeFlags::HAS_ERROR;
            }
            let idx = inner.push(data, flags);
            debug_assert_eq!(idx, expected);
        }
        Pool {
            inner: RwLock::new(inner),
        }
    }

    /// Intern a type, returning the existing index for a structurally
    /// identical type.
    ///
    /// # Panics
    /// Panics if the pool exceeds `u32::MAX` types.
    pub fn intern(&self, data: TypeData) -> Idx {
        if let Some(&idx) = self.inner.read().map.get(&data) {
            return idx;
        }

        let flags = self.compute_flags(&data);
        let mut inner = self.inner.write();
        // Another thread may have interned it between the locks.
        if let Some(&idx) = inner.map.get(&data) {
            return idx;
        }
        inner.push(data, flags)
    }

    fn compute_flags(&self, data: &TypeData) -> TypeFlags {
        match data {
            TypeData::Int
            | TypeData::Double
            | TypeData::Bool
            | TypeData::String
            | TypeData::Unit => TypeFlags::IS_PRIMITIVE,
            TypeData::Error => TypeFlags::IS_PRIMITIVE | TypeFlags::HAS_ERROR,
            TypeData::Nominal(_) => TypeFlags::IS_NOMINAL,
            TypeData::Function(sig) => {
                let mut flags = TypeFlags::IS_FUNCTION;
                if sig.throws {
                    flags |= TypeFlags::THROWS;
                }
                if sig.has_labels() {
                    flags |= TypeFlags::HAS_LABELS;
                }
                for param in sig.params.iter() {
                    flags |= self.flags(param.ty).propagated();
                }
                flags | self.flags(sig.ret).propagated()
            }
        }
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.inner.read().types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structural data of a type. An index from another pool reads as the
    /// error type.
    pub fn data(&self, idx: Idx) -> TypeData {
        self.inner
            .read()
            .types
            .get(idx.index())
            .cloned()
            .unwrap_or(TypeData::Error)
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.inner
            .read()
            .flags
            .get(idx.index())
            .copied()
            .unwrap_or(TypeFlags::HAS_ERROR)
    }

    // === Constructors ===

    pub fn nominal(&self, name: Name) -> Idx {
        self.intern(TypeData::Nominal(name))
    }

    pub fn function(&self, params: impl Into<Box<[Param]>>, ret: Idx, throws: bool) -> Idx {
        self.intern(TypeData::Function(FunctionSig {
            params: params.into(),
            ret,
            throws,
        }))
    }

    /// A non-throwing function with unlabeled parameters.
    pub fn positional_function(&self, params: &[Idx], ret: Idx) -> Idx {
        let params: Box<[Param]> = params.iter().copied().map(Param::positional).collect();
        self.function(params, ret, false)
    }

    // === Queries ===

    /// Signature of a function type, `None` for any other type.
    pub fn function_sig(&self, idx: Idx) -> Option<FunctionSig> {
        match self.inner.read().types.get(idx.index()) {
            Some(TypeData::Function(sig)) => Some(sig.clone()),
            _ => None,
        }
    }

    /// Name of a nominal type.
    pub fn nominal_name(&self, idx: Idx) -> Option<Name> {
        match self.inner.read().types.get(idx.index()) {
            Some(&TypeData::Nominal(name)) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn has_labels(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::HAS_LABELS)
    }

    #[inline]
    pub fn has_error(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::HAS_ERROR)
    }

    // === Label erasure and comparison ===

    /// Strip every argument label from a type, at every curry level and
    /// inside parameter types.
    pub fn erase_labels(&self, idx: Idx) -> Idx {
        if !self.has_labels(idx) {
            return idx;
        }
        let Some(sig) = self.function_sig(idx) else {
            return idx;
        };
        let params: Box<[Param]> = sig
            .params
            .iter()
            .map(|p| Param::positional(self.erase_labels(p.ty)))
            .collect();
        let ret = self.erase_labels(sig.ret);
        self.function(params, ret, sig.throws)
    }

    /// Check whether a value of type `from` may be used where `to` is
    /// expected.
    ///
    /// Labels are ignored on both sides. A non-throwing function converts
    /// to a throwing one, and results convert covariantly. The error type
    /// is compatible with everything.
    pub fn convertible(&self, from: Idx, to: Idx) -> bool {
        if from == to || self.has_error(from) || self.has_error(to) {
            return true;
        }
        match (self.function_sig(from), self.function_sig(to)) {
            (Some(from_sig), Some(to_sig)) => {
                from_sig.arity() == to_sig.arity()
                    && (!from_sig.throws || to_sig.throws)
                    && from_sig
                        .params
                        .iter()
                        .zip(to_sig.params.iter())
                        .all(|(f, t)| self.erase_labels(f.ty) == self.erase_labels(t.ty))
                    && self.convertible(from_sig.ret, to_sig.ret)
            }
            _ => false,
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool").field("len", &self.len()).finish()
    }
}
