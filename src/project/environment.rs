//! The declaration environment.
//!
//! Holds every declaration loaded from signature sources. Class, module and
//! interface declarations are flattened into one table keyed by absolute
//! name; nested declarations are registered under their enclosing name.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::env_loader::{LoadError, LocatedError};
use crate::base::{LineIndex, Namespace, TypeName};
use crate::parser::parse_signature;
use crate::syntax::{
    AliasDecl, ConstantDecl, Declaration, ExtensionDecl, GlobalDecl, Member, SuperClass,
    TypeParam,
};

/// The kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeclarationKind {
    Class,
    Module,
    Interface,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Module => "module",
            DeclarationKind::Interface => "interface",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class, module or interface registered under its absolute name.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: TypeName,
    pub declaration: Declaration,
    pub path: PathBuf,
}

impl TypeDecl {
    pub fn kind(&self) -> DeclarationKind {
        match &self.declaration {
            Declaration::Module(_) => DeclarationKind::Module,
            Declaration::Interface(_) => DeclarationKind::Interface,
            _ => DeclarationKind::Class,
        }
    }

    pub fn type_params(&self) -> &[TypeParam] {
        match &self.declaration {
            Declaration::Class(decl) => &decl.type_params,
            Declaration::Module(decl) => &decl.type_params,
            Declaration::Interface(decl) => &decl.type_params,
            _ => &[],
        }
    }

    pub fn super_class(&self) -> Option<&SuperClass> {
        match &self.declaration {
            Declaration::Class(decl) => decl.super_class.as_ref(),
            _ => None,
        }
    }

    pub fn members(&self) -> &[Member] {
        self.declaration.members()
    }

    /// Namespace that relative names inside this declaration resolve from.
    pub fn context(&self) -> Namespace {
        self.name.to_namespace()
    }
}

/// An `extension` block together with the namespace it was declared in.
#[derive(Debug, Clone)]
pub struct ExtensionEntry {
    pub declaration: ExtensionDecl,
    pub context: Namespace,
}

impl ExtensionEntry {
    pub fn extension_name(&self) -> &SmolStr {
        &self.declaration.extension_name
    }
}

/// A parsed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
}

/// All loaded declarations.
#[derive(Debug, Default)]
pub struct Environment {
    sources: Vec<SourceFile>,
    types: IndexMap<TypeName, TypeDecl>,
    aliases: IndexMap<TypeName, AliasDecl>,
    constants: IndexMap<TypeName, ConstantDecl>,
    globals: IndexMap<SmolStr, GlobalDecl>,
    extensions: Vec<ExtensionEntry>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and register its declarations.
    ///
    /// Nothing is registered when the source has syntax errors.
    pub fn add_source(&mut self, path: impl AsRef<Path>, text: &str) -> Result<(), LoadError> {
        let path = path.as_ref().to_path_buf();
        let parse = parse_signature(text);
        if !parse.ok() {
            let index = LineIndex::new(text);
            let errors = parse
                .errors
                .into_iter()
                .map(|error| LocatedError {
                    position: index.line_col(error.range.start()),
                    error,
                })
                .collect();
            return Err(LoadError::Syntax { path, errors });
        }

        for decl in &parse.declarations {
            self.insert_declaration(decl, &Namespace::root(), &path)?;
        }
        tracing::trace!(
            "Loaded {} declaration(s) from {}",
            parse.declarations.len(),
            path.display()
        );
        self.sources.push(SourceFile {
            path,
            declarations: parse.declarations,
        });
        Ok(())
    }

    fn insert_declaration(
        &mut self,
        decl: &Declaration,
        outer: &Namespace,
        path: &Path,
    ) -> Result<(), LoadError> {
        match decl {
            Declaration::Class(_) | Declaration::Module(_) | Declaration::Interface(_) => {
                let Some(written) = decl.type_name() else {
                    return Ok(());
                };
                let name = written.with_prefix(outer).absolute();
                if self.types.contains_key(&name) {
                    return Err(LoadError::DuplicateDeclaration {
                        name: name.relative().to_string(),
                        path: path.to_path_buf(),
                    });
                }
                let inner = name.to_namespace();
                self.types.insert(
                    name.clone(),
                    TypeDecl {
                        name,
                        declaration: decl.clone(),
                        path: path.to_path_buf(),
                    },
                );
                for member in decl.members() {
                    if let Member::Declaration { declaration } = member {
                        self.insert_declaration(declaration, &inner, path)?;
                    }
                }
            }
            Declaration::Extension(ext) => self.extensions.push(ExtensionEntry {
                declaration: ext.clone(),
                context: outer.clone(),
            }),
            Declaration::Alias(alias) => {
                let name = alias.name.with_prefix(outer).absolute();
                self.aliases.insert(name, alias.clone());
            }
            Declaration::Constant(constant) => {
                let name = constant.name.with_prefix(outer).absolute();
                self.constants.insert(name, constant.clone());
            }
            Declaration::Global(global) => {
                self.globals.insert(global.name.clone(), global.clone());
            }
        }
        Ok(())
    }

    /// Top-level declarations of every source, in load order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.sources.iter().flat_map(|s| s.declarations.iter())
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    /// Every class, module and interface name with its kind.
    pub fn each_declared_name(&self) -> impl Iterator<Item = (&TypeName, DeclarationKind)> {
        self.types.values().map(|decl| (&decl.name, decl.kind()))
    }

    pub fn find_declaration(&self, name: &TypeName) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn find_alias(&self, name: &TypeName) -> Option<&AliasDecl> {
        self.aliases.get(name)
    }

    pub fn find_constant(&self, name: &TypeName) -> Option<&ConstantDecl> {
        self.constants.get(name)
    }

    pub fn find_global(&self, name: &str) -> Option<&GlobalDecl> {
        self.globals.get(name)
    }

    pub fn is_class_or_module(&self, name: &TypeName) -> bool {
        self.find_declaration(name).is_some_and(|decl| {
            matches!(decl.kind(), DeclarationKind::Class | DeclarationKind::Module)
        })
    }

    pub fn is_interface(&self, name: &TypeName) -> bool {
        self.find_declaration(name)
            .is_some_and(|decl| decl.kind() == DeclarationKind::Interface)
    }

    /// Extensions of the class or module `name`, sorted by extension name.
    pub fn extensions_of(&self, name: &TypeName) -> Vec<&ExtensionEntry> {
        let mut found: Vec<_> = self
            .extensions
            .iter()
            .filter(|entry| {
                self.absolute_type_name(&entry.declaration.name, &entry.context)
                    .as_ref()
                    == Some(name)
            })
            .collect();
        found.sort_by(|a, b| a.extension_name().cmp(b.extension_name()));
        found
    }

    fn contains_type(&self, name: &TypeName) -> bool {
        self.types.contains_key(name) || self.aliases.contains_key(name)
    }

    /// Resolve `name` as written inside `context`.
    ///
    /// Relative names are tried in `context` first, then in each enclosing
    /// namespace up to the root.
    pub fn absolute_type_name(&self, name: &TypeName, context: &Namespace) -> Option<TypeName> {
        if name.is_absolute() {
            return self.contains_type(name).then(|| name.clone());
        }
        let mut namespace = Some(context.absolute());
        while let Some(current) = namespace {
            let candidate = name.with_prefix(&current);
            if self.contains_type(&candidate) {
                return Some(candidate);
            }
            namespace = current.parent();
        }
        None
    }
}
