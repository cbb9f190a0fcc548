//! High-level IR (HIR): built definitions.
//!
//! ## Key Types
//!
//! - [`Ancestor`] - one entry of a linearized ancestor chain
//! - [`Definition`] - the instance or singleton side of a type
//! - [`MethodRecord`] - a resolved method with its overloads
//! - [`DefinitionBuilder`] - builds chains and definitions from an
//!   [`Environment`](crate::project::Environment)
//!
//! ## Build Layers
//!
//! ```text
//! Environment (declarations)
//!     │
//!     ▼
//! build_ancestors(root)     ← linearized chain
//!     │
//!     ▼
//! build_instance(name)      ← method table, least specific first
//! build_singleton(name)
//! build_interface(name)
//! ```

mod ancestors;
mod builder;
mod definition;
mod errors;

pub use ancestors::Ancestor;
pub use builder::DefinitionBuilder;
pub use definition::{Accessibility, Definition, DefinitionKind, MethodRecord};
pub use errors::BuildError;
