//! Entries of a linearized ancestor chain.

use std::fmt;

use smol_str::SmolStr;

use crate::base::TypeName;
use crate::project::TypeDecl;
use crate::syntax::Type;

/// One entry of an ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ancestor {
    /// `singleton(Foo)`
    Singleton { name: TypeName },
    /// `singleton(Foo (Ext))`
    SingletonExtension {
        name: TypeName,
        extension_name: SmolStr,
    },
    /// `Foo[A]`
    Instance { name: TypeName, args: Vec<Type> },
    /// `Foo[A] (Ext)`
    InstanceExtension {
        name: TypeName,
        args: Vec<Type>,
        extension_name: SmolStr,
    },
}

impl Ancestor {
    /// The instance ancestor of a declaration applied to its own type
    /// variables, `Array[Elem]`.
    pub fn instance_root(decl: &TypeDecl) -> Self {
        Ancestor::Instance {
            name: decl.name.clone(),
            args: decl
                .type_params()
                .iter()
                .map(|param| Type::variable(param.name.clone()))
                .collect(),
        }
    }

    pub fn singleton(name: TypeName) -> Self {
        Ancestor::Singleton { name }
    }

    pub fn name(&self) -> &TypeName {
        match self {
            Ancestor::Singleton { name }
            | Ancestor::SingletonExtension { name, .. }
            | Ancestor::Instance { name, .. }
            | Ancestor::InstanceExtension { name, .. } => name,
        }
    }

    pub fn args(&self) -> &[Type] {
        match self {
            Ancestor::Instance { args, .. } | Ancestor::InstanceExtension { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            Ancestor::Singleton { .. } | Ancestor::SingletonExtension { .. }
        )
    }

    pub fn extension_name(&self) -> Option<&SmolStr> {
        match self {
            Ancestor::SingletonExtension { extension_name, .. }
            | Ancestor::InstanceExtension { extension_name, .. } => Some(extension_name),
            _ => None,
        }
    }
}

fn write_instance(f: &mut fmt::Formatter<'_>, name: &TypeName, args: &[Type]) -> fmt::Result {
    write!(f, "{}", name.relative())?;
    if !args.is_empty() {
        let args: Vec<_> = args.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", args.join(", "))?;
    }
    Ok(())
}

impl fmt::Display for Ancestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ancestor::Singleton { name } => write!(f, "singleton({})", name.relative()),
            Ancestor::SingletonExtension {
                name,
                extension_name,
            } => write!(f, "singleton({} ({extension_name}))", name.relative()),
            Ancestor::Instance { name, args } => write_instance(f, name, args),
            Ancestor::InstanceExtension {
                name,
                args,
                extension_name,
            } => {
                write_instance(f, name, args)?;
                write!(f, " ({extension_name})")
            }
        }
    }
}
