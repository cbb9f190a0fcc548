//! # sigq
//!
//! Loads type signature files and answers structural queries about the
//! declared types: ancestor chains, method tables and method details.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! cli       → clap argument definitions
//!   ↓
//! commands  → query dispatch and output rendering
//!   ↓
//! hir       → ancestor linearization, definition building
//!   ↓
//! project   → environment, loader, bundled signatures
//!   ↓
//! parser    → Logos lexer, recursive-descent parser
//!   ↓
//! syntax    → declarations, members and types
//!   ↓
//! base      → Primitives (TypeName, Namespace, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → project → hir → commands)
// ============================================================================

/// Foundation types: qualified names, line/column positions
pub mod base;

/// Syntax: declaration and type trees
pub mod syntax;

/// Parser: Logos lexer and recursive-descent parser
pub mod parser;

/// Project: declaration environment and source loading
pub mod project;

/// High-level IR: ancestor chains and method tables
pub mod hir;

/// Query commands and their output
pub mod commands;

/// Command-line arguments
pub mod cli;

// Re-export foundation types
pub use base::{LineCol, LineIndex, Namespace, TextRange, TextSize, TypeName, parse_type_name};

pub use hir::{Ancestor, Definition, DefinitionBuilder, DefinitionKind};
pub use project::{Environment, EnvironmentLoader, LoadError, LoaderConfig};
