//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (delimiters, `end`)
//! - E03xx: Declaration and member errors
//! - E04xx: Type errors

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid or unexpected character in source
    E0101,
    /// Integer literal out of range
    E0102,

    /// Expected a specific token
    E0201,
    /// Declaration body not closed with `end`
    E0202,

    /// Not a declaration
    E0301,
    /// Not a member
    E0302,
    /// Missing or malformed name
    E0303,
    /// Method definition without any types
    E0304,

    /// Not a type
    E0401,
}

impl ErrorCode {
    /// Short description used in documentation and hints.
    pub fn description(self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "integer literal out of range",
            Self::E0201 => "unexpected token",
            Self::E0202 => "missing `end`",
            Self::E0301 => "expected a declaration",
            Self::E0302 => "expected a member",
            Self::E0303 => "invalid name",
            Self::E0304 => "method definition without types",
            Self::E0401 => "expected a type",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
