//! Built definitions and their method tables.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ancestors::Ancestor;
use crate::base::TypeName;
use crate::syntax::{MethodType, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessibility {
    Public,
    Private,
    Protected,
}

impl Accessibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Private => "private",
            Accessibility::Protected => "protected",
        }
    }
}

impl From<Visibility> for Accessibility {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Public => Accessibility::Public,
            Visibility::Private => Accessibility::Private,
            Visibility::Protected => Accessibility::Protected,
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRecord {
    pub name: SmolStr,
    pub accessibility: Accessibility,
    /// Type whose declaration introduced the method; `None` for synthesized methods
    pub defined_in: Option<TypeName>,
    /// Type that provides the effective implementation
    pub implemented_in: TypeName,
    /// Overloads in declaration order, never empty
    pub method_types: Vec<MethodType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Instance,
    Singleton,
}

/// The instance or singleton side of a type with all inherited members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub declaration: TypeName,
    pub kind: DefinitionKind,
    pub ancestors: Vec<Ancestor>,
    pub methods: IndexMap<SmolStr, MethodRecord>,
}

impl Definition {
    pub fn method(&self, name: &str) -> Option<&MethodRecord> {
        self.methods.get(name)
    }

    /// Methods sorted by name, optionally only those implemented by the
    /// type itself.
    pub fn sorted_methods(&self, inherit: bool) -> Vec<&MethodRecord> {
        let mut methods: Vec<_> = self
            .methods
            .values()
            .filter(|method| inherit || method.implemented_in == self.declaration)
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods
    }
}
