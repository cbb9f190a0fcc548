//! HIR layer tests
//!
//! - Ancestor linearization (instance, singleton, extensions)
//! - Method table composition (overloads, aliases, interfaces, attributes)

pub mod tests_ancestors;
pub mod tests_methods;
