//! Foundation types for sigq.
//!
//! - [`TypeName`], [`Namespace`] - qualified names
//! - [`parse_type_name`] - user text to absolute names
//! - [`LineIndex`], [`LineCol`] - offset to line/column conversion
//!
//! This module has NO dependencies on other sigq modules.

mod line_index;
mod type_name;

pub use line_index::{LineCol, LineIndex};
pub use type_name::{NameError, Namespace, SEPARATOR, TypeName, TypeNameKind, parse_type_name};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
