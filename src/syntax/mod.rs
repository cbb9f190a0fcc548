//! Signature syntax: declarations, members and structured types.
//!
//! These are plain data produced by [`crate::parser`] and consumed by the
//! environment and definition builder. Everything here serializes with
//! serde for the `ast` dump.

pub mod decl;
pub mod substitution;
pub mod types;

pub use decl::{
    AliasDecl, AliasKind, Attribute, ClassDecl, ConstantDecl, Declaration, ExtensionDecl,
    GlobalDecl, InstanceVariable, InterfaceDecl, Member, MethodAlias, MethodDefinition,
    MethodKind, Mixin, ModuleDecl, SuperClass, TypeParam, Variance, Visibility, param_names,
};
pub use substitution::Substitution;
pub use types::{Block, FunctionType, Literal, MethodType, Param, Type};
