//! Error codes for compiler diagnostics.
//!
//! The first digit names the phase: E2xxx are semantic (type) errors,
//! E9xxx are internal.

use std::fmt;

/// Error codes for all diagnostics this compiler emits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Type Errors (E2xxx)
    /// Type mismatch against a contextual type
    E2001,
    /// Unknown type name in an annotation
    E2002,
    /// Unbound identifier or compound name
    E2003,
    /// Argument count mismatch
    E2004,
    /// Duplicate declaration
    E2006,
    /// Incorrect or extraneous argument labels
    E2011,
    /// Ambiguous reference to an overloaded declaration
    E2023,
    /// No overload matches the call
    E2024,
    /// Value is not callable
    E2025,
    /// Throwing call not marked with `try`
    E2026,
    /// Assignment through a read-only subscript or immutable base
    E2027,
    /// Type has no member with this name
    E2028,
    /// Type or module name used as a value
    E2029,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// All variants, for exhaustive tests.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2006,
        ErrorCode::E2011,
        ErrorCode::E2023,
        ErrorCode::E2024,
        ErrorCode::E2025,
        ErrorCode::E2026,
        ErrorCode::E2027,
        ErrorCode::E2028,
        ErrorCode::E2029,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// Get the code as a string (e.g., "E2001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2023 => "E2023",
            ErrorCode::E2024 => "E2024",
            ErrorCode::E2025 => "E2025",
            ErrorCode::E2026 => "E2026",
            ErrorCode::E2027 => "E2027",
            ErrorCode::E2028 => "E2028",
            ErrorCode::E2029 => "E2029",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Parse a code from its string form.
    pub fn parse(code: &str) -> Option<ErrorCode> {
        Self::ALL.iter().copied().find(|c| c.as_str() == code)
    }

    /// Short description used by `--explain`-style lookups.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "type mismatch",
            ErrorCode::E2002 => "unknown type",
            ErrorCode::E2003 => "unbound name",
            ErrorCode::E2004 => "wrong number of arguments",
            ErrorCode::E2006 => "duplicate declaration",
            ErrorCode::E2011 => "incorrect argument labels",
            ErrorCode::E2023 => "ambiguous reference",
            ErrorCode::E2024 => "no matching overload",
            ErrorCode::E2025 => "value is not callable",
            ErrorCode::E2026 => "call can throw but is not marked with 'try'",
            ErrorCode::E2027 => "cannot assign through subscript",
            ErrorCode::E2028 => "no such member",
            ErrorCode::E2029 => "name cannot be used as a value",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::E9002 => "too many errors",
        }
    }

    /// Check if this is a type-checking error code.
    pub fn is_type_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    /// Check if this is an internal error code.
    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
