//! Declaration and member AST produced by the signature parser.

use serde::Serialize;
use smol_str::SmolStr;

use super::types::{MethodType, Type};
use crate::base::TypeName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
}

/// A declared type parameter, `unchecked out Elem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParam {
    pub name: SmolStr,
    pub variance: Variance,
    pub unchecked: bool,
}

impl TypeParam {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            variance: Variance::Invariant,
            unchecked: false,
        }
    }
}

/// Names of a parameter list, in declaration order.
pub fn param_names(params: &[TypeParam]) -> Vec<SmolStr> {
    params.iter().map(|p| p.name.clone()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

/// `def foo`, `def self.foo` or `def self?.foo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Instance,
    Singleton,
    SingletonInstance,
}

impl MethodKind {
    pub fn is_instance(self) -> bool {
        matches!(self, MethodKind::Instance | MethodKind::SingletonInstance)
    }

    pub fn is_singleton(self) -> bool {
        matches!(self, MethodKind::Singleton | MethodKind::SingletonInstance)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDefinition {
    pub name: SmolStr,
    pub kind: MethodKind,
    pub types: Vec<MethodType>,
    /// Ends with `| ...`: extends the inherited overloads instead of replacing them
    pub overload: bool,
    /// `private def ...` on a single line
    pub visibility: Option<Visibility>,
}

/// `include Name[Args]` or `extend Name[Args]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mixin {
    pub name: TypeName,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasKind {
    Instance,
    Singleton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodAlias {
    pub new_name: SmolStr,
    pub old_name: SmolStr,
    pub kind: AliasKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: SmolStr,
    #[serde(rename = "type")]
    pub ty: Type,
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceVariable {
    pub name: SmolStr,
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    MethodDefinition(MethodDefinition),
    Include(Mixin),
    Extend(Mixin),
    Alias(MethodAlias),
    AttrReader(Attribute),
    AttrWriter(Attribute),
    AttrAccessor(Attribute),
    InstanceVariable(InstanceVariable),
    Public,
    Private,
    Protected,
    Declaration { declaration: Box<Declaration> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuperClass {
    pub name: TypeName,
    pub args: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    pub super_class: Option<SuperClass>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    pub members: Vec<Member>,
}

/// `extension String (Pathname) ... end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionDecl {
    pub name: TypeName,
    pub type_params: Vec<TypeParam>,
    pub extension_name: SmolStr,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasDecl {
    pub name: TypeName,
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantDecl {
    pub name: TypeName,
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalDecl {
    pub name: SmolStr,
    #[serde(rename = "type")]
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "declaration", rename_all = "snake_case")]
pub enum Declaration {
    Class(ClassDecl),
    Module(ModuleDecl),
    Interface(InterfaceDecl),
    Extension(ExtensionDecl),
    Alias(AliasDecl),
    Constant(ConstantDecl),
    Global(GlobalDecl),
}

impl Declaration {
    /// The declared name; globals have no type name.
    pub fn type_name(&self) -> Option<&TypeName> {
        match self {
            Declaration::Class(decl) => Some(&decl.name),
            Declaration::Module(decl) => Some(&decl.name),
            Declaration::Interface(decl) => Some(&decl.name),
            Declaration::Extension(decl) => Some(&decl.name),
            Declaration::Alias(decl) => Some(&decl.name),
            Declaration::Constant(decl) => Some(&decl.name),
            Declaration::Global(_) => None,
        }
    }

    /// Members of declarations that have a body.
    pub fn members(&self) -> &[Member] {
        match self {
            Declaration::Class(decl) => &decl.members,
            Declaration::Module(decl) => &decl.members,
            Declaration::Interface(decl) => &decl.members,
            Declaration::Extension(decl) => &decl.members,
            _ => &[],
        }
    }
}
