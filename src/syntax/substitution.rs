//! Type variable substitution.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::types::Type;

/// A mapping from type variable names to types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    mapping: FxHashMap<SmolStr, Type>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair each parameter with the argument at the same position.
    ///
    /// Callers check arity first; surplus entries on either side are ignored.
    pub fn build(params: &[SmolStr], args: &[Type]) -> Self {
        Self {
            mapping: params.iter().cloned().zip(args.iter().cloned()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.mapping.get(name)
    }

    /// A copy with `names` unbound.
    pub fn without(&self, names: &[SmolStr]) -> Self {
        if names.is_empty() {
            return self.clone();
        }
        Self {
            mapping: self
                .mapping
                .iter()
                .filter(|(name, _)| !names.contains(name))
                .map(|(name, ty)| (name.clone(), ty.clone()))
                .collect(),
        }
    }
}
