//! Pre-computed type metadata flags.
//!
//! Computed once when a type is interned, so label erasure and error
//! propagation can skip types that cannot be affected.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u16 {
        // === Presence Flags ===

        /// Contains the error type.
        const HAS_ERROR = 1 << 0;
        /// Some function type at any depth carries a parameter label.
        const HAS_LABELS = 1 << 1;

        // === Category Flags ===

        /// Built-in primitive type.
        const IS_PRIMITIVE = 1 << 4;
        /// Nominal (user-declared) type.
        const IS_NOMINAL = 1 << 5;
        /// Function type.
        const IS_FUNCTION = 1 << 6;

        // === Capability Flags ===

        /// Function type whose outermost level may throw.
        const THROWS = 1 << 8;
    }
}

impl TypeFlags {
    /// Flags a parent type inherits from one of its components.
    pub const PROPAGATE_MASK: Self = Self::HAS_ERROR.union(Self::HAS_LABELS);

    /// Presence flags to carry from a child type into its parent.
    #[inline]
    pub fn propagated(self) -> Self {
        self & Self::PROPAGATE_MASK
    }
}
