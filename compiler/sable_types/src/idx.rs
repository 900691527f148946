//! Type index handle.
//!
//! Every type lives in the [`Pool`](crate::Pool) and is referenced by a
//! 32-bit `Idx`. Structurally identical types intern to the same index, so
//! type equality is index comparison.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-5) ===
    // Pre-interned at pool creation.

    /// `Int`
    pub const INT: Self = Self(0);
    /// `Double`
    pub const DOUBLE: Self = Self(1);
    /// `Bool`
    pub const BOOL: Self = Self(2);
    /// `String`
    pub const STRING: Self = Self(3);
    /// The empty tuple `()`.
    pub const UNIT: Self = Self(4);
    /// The error type (placeholder for type errors, propagates silently).
    pub const ERROR: Self = Self(5);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 6;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    /// Human-readable name for primitive types, `None` for types that need
    /// a pool to render.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("Int"),
            1 => Some("Double"),
            2 => Some("Bool"),
            3 => Some("String"),
            4 => Some("()"),
            5 => Some("<<error type>>"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx({name})"),
            None if self.is_none() => write!(f, "Idx::NONE"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}
