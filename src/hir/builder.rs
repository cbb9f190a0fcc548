//! Definition builder: ancestor linearization and method composition.
//!
//! ## Ancestor chains
//!
//! Chains are built most-specific-first by pushing onto the front of a deque
//! after the less specific part has been built:
//!
//! ```text
//! Instance(Foo):   super chain, includes, Foo, extensions (by name)
//! Singleton(Foo):  singleton super chain, extends, singleton(Foo), extensions
//! ```
//!
//! ## Method tables
//!
//! Method tables are composed by walking the chain from least to most
//! specific, so later entries override earlier ones.

use std::collections::VecDeque;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ancestors::Ancestor;
use super::definition::{Accessibility, Definition, DefinitionKind, MethodRecord};
use super::errors::BuildError;
use crate::base::{Namespace, TypeName};
use crate::project::{DeclarationKind, Environment, TypeDecl};
use crate::syntax::{
    AliasKind, Attribute, FunctionType, Member, MethodKind, MethodType, Param, Substitution,
    Type, param_names,
};

type MethodTable = IndexMap<SmolStr, MethodRecord>;

/// Which side of a type a member list is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Instance,
    Singleton,
}

const BASIC_OBJECT: &str = "BasicObject";
const OBJECT: &str = "Object";
const MODULE: &str = "Module";
const CLASS: &str = "Class";

/// Builds ancestor chains and definitions on demand. Nothing is cached.
pub struct DefinitionBuilder<'env> {
    env: &'env Environment,
}

impl<'env> DefinitionBuilder<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &'env Environment {
        self.env
    }

    // =========================================================================
    // Lookup helpers
    // =========================================================================

    fn class_decl(&self, name: &TypeName) -> Result<&'env TypeDecl, BuildError> {
        self.env
            .find_declaration(name)
            .filter(|decl| decl.kind() != DeclarationKind::Interface)
            .ok_or_else(|| BuildError::UnknownType(name.clone()))
    }

    fn interface_decl(&self, name: &TypeName) -> Result<&'env TypeDecl, BuildError> {
        self.env
            .find_declaration(name)
            .filter(|decl| decl.kind() == DeclarationKind::Interface)
            .ok_or_else(|| BuildError::UnknownType(name.clone()))
    }

    fn resolve_class(&self, name: &TypeName, context: &Namespace) -> Result<TypeName, BuildError> {
        self.env
            .absolute_type_name(name, context)
            .filter(|resolved| self.env.is_class_or_module(resolved))
            .ok_or_else(|| BuildError::UnknownType(name.clone()))
    }

    fn resolve_interface(
        &self,
        name: &TypeName,
        context: &Namespace,
    ) -> Result<TypeName, BuildError> {
        self.env
            .absolute_type_name(name, context)
            .filter(|resolved| self.env.is_interface(resolved))
            .ok_or_else(|| BuildError::UnknownType(name.clone()))
    }

    /// A well-known root type, if the environment declares it.
    fn builtin(&self, name: &str) -> Option<TypeName> {
        let name = TypeName::root(name);
        self.env.is_class_or_module(&name).then_some(name)
    }

    fn check_arity(decl: &TypeDecl, args: &[Type]) -> Result<(), BuildError> {
        let expected = decl.type_params().len();
        if !args.is_empty() && args.len() != expected {
            return Err(BuildError::InvalidTypeApplication {
                name: decl.name.clone(),
                expected,
                actual: args.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Ancestors
    // =========================================================================

    /// Linearize the chain of `root`, most specific first.
    pub fn build_ancestors(&self, root: &Ancestor) -> Result<Vec<Ancestor>, BuildError> {
        let mut chain = VecDeque::new();
        let mut building = Vec::new();
        self.linearize(root.clone(), &mut chain, &mut building)?;
        tracing::trace!("Built {} ancestor(s) for {root}", chain.len());
        Ok(chain.into())
    }

    fn linearize(
        &self,
        ancestor: Ancestor,
        chain: &mut VecDeque<Ancestor>,
        building: &mut Vec<(TypeName, bool)>,
    ) -> Result<(), BuildError> {
        let key = (ancestor.name().clone(), ancestor.is_singleton());
        if building.contains(&key) {
            return Err(BuildError::RecursiveAncestor { name: key.0 });
        }
        building.push(key);
        let result = match &ancestor {
            Ancestor::Instance { name, args } => self.linearize_instance(name, args, chain, building),
            Ancestor::Singleton { name } => self.linearize_singleton(name, chain, building),
            Ancestor::InstanceExtension { .. } | Ancestor::SingletonExtension { .. } => {
                chain.push_front(ancestor.clone());
                Ok(())
            }
        };
        building.pop();
        result
    }

    fn linearize_instance(
        &self,
        name: &TypeName,
        args: &[Type],
        chain: &mut VecDeque<Ancestor>,
        building: &mut Vec<(TypeName, bool)>,
    ) -> Result<(), BuildError> {
        let decl = self.class_decl(name)?;
        Self::check_arity(decl, args)?;
        let sub = Substitution::build(&param_names(decl.type_params()), args);
        let context = decl.context();

        if decl.kind() == DeclarationKind::Class && name.name != BASIC_OBJECT {
            let super_class: Option<(TypeName, Vec<Type>)> = match decl.super_class() {
                Some(super_class) => Some((
                    self.resolve_class(&super_class.name, &context)?,
                    super_class.args.iter().map(|arg| arg.sub(&sub)).collect(),
                )),
                None if name.name != OBJECT => self.builtin(OBJECT).map(|object| (object, Vec::new())),
                None => None,
            };
            if let Some((super_name, super_args)) = super_class {
                self.linearize(
                    Ancestor::Instance {
                        name: super_name,
                        args: super_args,
                    },
                    chain,
                    building,
                )?;
            }
        }

        self.linearize_mixins(decl.members(), Side::Instance, &sub, &context, chain, building)?;
        chain.push_front(Ancestor::Instance {
            name: name.clone(),
            args: args.to_vec(),
        });

        for extension in self.env.extensions_of(name) {
            let ext_sub = Substitution::build(&param_names(&extension.declaration.type_params), args);
            self.linearize_mixins(
                &extension.declaration.members,
                Side::Instance,
                &ext_sub,
                &context,
                chain,
                building,
            )?;
            chain.push_front(Ancestor::InstanceExtension {
                name: name.clone(),
                args: args.to_vec(),
                extension_name: extension.extension_name().clone(),
            });
        }
        Ok(())
    }

    fn linearize_singleton(
        &self,
        name: &TypeName,
        chain: &mut VecDeque<Ancestor>,
        building: &mut Vec<(TypeName, bool)>,
    ) -> Result<(), BuildError> {
        let decl = self.class_decl(name)?;
        let context = decl.context();

        let parent = match decl.kind() {
            DeclarationKind::Class if name.name == BASIC_OBJECT => {
                self.builtin(CLASS).map(|class| Ancestor::Instance {
                    name: class,
                    args: Vec::new(),
                })
            }
            DeclarationKind::Class => match decl.super_class() {
                Some(super_class) => Some(Ancestor::singleton(
                    self.resolve_class(&super_class.name, &context)?,
                )),
                None if name.name != OBJECT => self.builtin(OBJECT).map(Ancestor::singleton),
                None => None,
            },
            _ => self.builtin(MODULE).map(|module| Ancestor::Instance {
                name: module,
                args: Vec::new(),
            }),
        };
        if let Some(parent) = parent {
            self.linearize(parent, chain, building)?;
        }

        let sub = Substitution::new();
        self.linearize_mixins(decl.members(), Side::Singleton, &sub, &context, chain, building)?;
        chain.push_front(Ancestor::singleton(name.clone()));

        for extension in self.env.extensions_of(name) {
            self.linearize_mixins(
                &extension.declaration.members,
                Side::Singleton,
                &sub,
                &context,
                chain,
                building,
            )?;
            chain.push_front(Ancestor::SingletonExtension {
                name: name.clone(),
                extension_name: extension.extension_name().clone(),
            });
        }
        Ok(())
    }

    /// Module `include`s (instance side) or `extend`s (singleton side).
    /// Interfaces never enter the chain.
    fn linearize_mixins(
        &self,
        members: &[Member],
        side: Side,
        sub: &Substitution,
        context: &Namespace,
        chain: &mut VecDeque<Ancestor>,
        building: &mut Vec<(TypeName, bool)>,
    ) -> Result<(), BuildError> {
        for member in members {
            let mixin = match (member, side) {
                (Member::Include(mixin), Side::Instance) | (Member::Extend(mixin), Side::Singleton) => {
                    mixin
                }
                _ => continue,
            };
            if mixin.name.is_interface() {
                continue;
            }
            let module = self.resolve_class(&mixin.name, context)?;
            let already_included = chain
                .iter()
                .any(|a| matches!(a, Ancestor::Instance { name, .. } if *name == module));
            if already_included {
                tracing::trace!("Skipping {module}: already in the chain");
                continue;
            }
            let args = mixin.args.iter().map(|arg| arg.sub(sub)).collect();
            self.linearize(Ancestor::Instance { name: module, args }, chain, building)?;
        }
        Ok(())
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    /// The instance side of a class or module.
    pub fn build_instance(&self, name: &TypeName) -> Result<Definition, BuildError> {
        let decl = self.class_decl(name)?;
        let ancestors = self.build_ancestors(&Ancestor::instance_root(decl))?;
        let mut methods = MethodTable::new();
        for ancestor in ancestors.iter().rev() {
            self.apply_ancestor(ancestor, &mut methods)?;
        }
        tracing::debug!("Built instance definition of {name}: {} method(s)", methods.len());
        Ok(Definition {
            declaration: name.clone(),
            kind: DefinitionKind::Instance,
            ancestors,
            methods,
        })
    }

    /// The singleton side of a class or module.
    ///
    /// Classes get a `new` derived from `initialize` unless they declare
    /// `def self.new` themselves.
    pub fn build_singleton(&self, name: &TypeName) -> Result<Definition, BuildError> {
        let decl = self.class_decl(name)?;
        let ancestors = self.build_ancestors(&Ancestor::singleton(name.clone()))?;
        let mut methods = MethodTable::new();
        for ancestor in ancestors.iter().rev() {
            self.apply_ancestor(ancestor, &mut methods)?;
        }

        let declares_new = methods
            .get("new")
            .is_some_and(|method| method.implemented_in == *name);
        if decl.kind() == DeclarationKind::Class && !declares_new {
            let instance = self.build_instance(name)?;
            if let Some(initialize) = instance.method("initialize") {
                let method_types = initialize
                    .method_types
                    .iter()
                    .map(|ty| ty.with_return_type(Type::Instance))
                    .collect();
                methods.insert(
                    SmolStr::new_inline("new"),
                    MethodRecord {
                        name: SmolStr::new_inline("new"),
                        accessibility: Accessibility::Public,
                        defined_in: None,
                        implemented_in: name.clone(),
                        method_types,
                    },
                );
            }
        }

        tracing::debug!("Built singleton definition of {name}: {} method(s)", methods.len());
        Ok(Definition {
            declaration: name.clone(),
            kind: DefinitionKind::Singleton,
            ancestors,
            methods,
        })
    }

    /// An interface with the methods of the interfaces it includes.
    pub fn build_interface(&self, name: &TypeName) -> Result<Definition, BuildError> {
        let decl = self.interface_decl(name)?;
        let root = Ancestor::instance_root(decl);
        let methods = self.interface_methods(name, root.args(), &mut Vec::new())?;
        Ok(Definition {
            declaration: name.clone(),
            kind: DefinitionKind::Instance,
            ancestors: vec![root],
            methods,
        })
    }

    fn apply_ancestor(&self, ancestor: &Ancestor, methods: &mut MethodTable) -> Result<(), BuildError> {
        let owner = ancestor.name();
        let decl = self.class_decl(owner)?;
        let context = decl.context();
        match ancestor {
            Ancestor::Instance { args, .. } => {
                let sub = Substitution::build(&param_names(decl.type_params()), args);
                self.apply_members(decl.members(), Side::Instance, &sub, owner, &context, methods)
            }
            Ancestor::Singleton { .. } => self.apply_members(
                decl.members(),
                Side::Singleton,
                &Substitution::new(),
                owner,
                &context,
                methods,
            ),
            Ancestor::InstanceExtension {
                args,
                extension_name,
                ..
            } => {
                let Some(extension) = self
                    .env
                    .extensions_of(owner)
                    .into_iter()
                    .find(|ext| ext.extension_name() == extension_name)
                else {
                    return Ok(());
                };
                let sub = Substitution::build(&param_names(&extension.declaration.type_params), args);
                self.apply_members(
                    &extension.declaration.members,
                    Side::Instance,
                    &sub,
                    owner,
                    &context,
                    methods,
                )
            }
            Ancestor::SingletonExtension { extension_name, .. } => {
                let Some(extension) = self
                    .env
                    .extensions_of(owner)
                    .into_iter()
                    .find(|ext| ext.extension_name() == extension_name)
                else {
                    return Ok(());
                };
                self.apply_members(
                    &extension.declaration.members,
                    Side::Singleton,
                    &Substitution::new(),
                    owner,
                    &context,
                    methods,
                )
            }
        }
    }

    /// Apply one member list on top of `methods`.
    fn apply_members(
        &self,
        members: &[Member],
        side: Side,
        sub: &Substitution,
        owner: &TypeName,
        context: &Namespace,
        methods: &mut MethodTable,
    ) -> Result<(), BuildError> {
        let mut section = Accessibility::Public;
        for member in members {
            match member {
                Member::Public => section = Accessibility::Public,
                Member::Private => section = Accessibility::Private,
                Member::Protected => section = Accessibility::Protected,
                Member::MethodDefinition(def) => {
                    let on_side = match side {
                        Side::Instance => def.kind.is_instance(),
                        Side::Singleton => def.kind.is_singleton(),
                    };
                    if !on_side {
                        continue;
                    }
                    let accessibility = match (side, def.kind) {
                        (Side::Instance, _) if def.name == "initialize" => Accessibility::Private,
                        (Side::Instance, MethodKind::SingletonInstance) => Accessibility::Private,
                        (Side::Singleton, MethodKind::SingletonInstance) => Accessibility::Public,
                        _ => def.visibility.map(Accessibility::from).unwrap_or(section),
                    };
                    let mut method_types: Vec<MethodType> =
                        def.types.iter().map(|ty| ty.sub(sub)).collect();
                    let mut defined_in = Some(owner.clone());
                    if def.overload {
                        if let Some(inherited) = methods.get(&def.name) {
                            method_types.extend(inherited.method_types.iter().cloned());
                            defined_in = inherited.defined_in.clone();
                        }
                    }
                    methods.insert(
                        def.name.clone(),
                        MethodRecord {
                            name: def.name.clone(),
                            accessibility,
                            defined_in,
                            implemented_in: owner.clone(),
                            method_types,
                        },
                    );
                }
                Member::AttrReader(attr) if side == Side::Instance => {
                    insert_reader(attr, sub, section, owner, methods);
                }
                Member::AttrWriter(attr) if side == Side::Instance => {
                    insert_writer(attr, sub, section, owner, methods);
                }
                Member::AttrAccessor(attr) if side == Side::Instance => {
                    insert_reader(attr, sub, section, owner, methods);
                    insert_writer(attr, sub, section, owner, methods);
                }
                Member::Include(mixin) | Member::Extend(mixin)
                    if mixin.name.is_interface()
                        && matches!(
                            (member, side),
                            (Member::Include(_), Side::Instance)
                                | (Member::Extend(_), Side::Singleton)
                        ) =>
                {
                    let interface = self.resolve_interface(&mixin.name, context)?;
                    let args: Vec<Type> = mixin.args.iter().map(|arg| arg.sub(sub)).collect();
                    let provided = self.interface_methods(&interface, &args, &mut Vec::new())?;
                    for (name, method) in provided {
                        let overridden = methods
                            .get(&name)
                            .is_some_and(|existing| existing.implemented_in == *owner);
                        if overridden {
                            continue;
                        }
                        methods.insert(
                            name,
                            MethodRecord {
                                accessibility: section,
                                implemented_in: owner.clone(),
                                ..method
                            },
                        );
                    }
                }
                Member::Alias(alias) => {
                    let on_side = matches!(
                        (alias.kind, side),
                        (AliasKind::Instance, Side::Instance) | (AliasKind::Singleton, Side::Singleton)
                    );
                    if !on_side {
                        continue;
                    }
                    let original = methods.get(&alias.old_name).cloned().ok_or_else(|| {
                        BuildError::UnknownMethodAlias {
                            type_name: owner.clone(),
                            new_name: alias.new_name.clone(),
                            old_name: alias.old_name.clone(),
                        }
                    })?;
                    methods.insert(
                        alias.new_name.clone(),
                        MethodRecord {
                            name: alias.new_name.clone(),
                            accessibility: section,
                            implemented_in: owner.clone(),
                            ..original
                        },
                    );
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Methods of an interface applied to `args`, including those of the
    /// interfaces it includes.
    fn interface_methods(
        &self,
        name: &TypeName,
        args: &[Type],
        building: &mut Vec<TypeName>,
    ) -> Result<MethodTable, BuildError> {
        let decl = self.interface_decl(name)?;
        if building.contains(name) {
            return Err(BuildError::RecursiveAncestor { name: name.clone() });
        }
        Self::check_arity(decl, args)?;
        let sub = Substitution::build(&param_names(decl.type_params()), args);
        let context = decl.context();

        building.push(name.clone());
        let mut methods = MethodTable::new();
        for member in decl.members() {
            match member {
                Member::Include(mixin) => {
                    let included = self.resolve_interface(&mixin.name, &context)?;
                    let args: Vec<Type> = mixin.args.iter().map(|arg| arg.sub(&sub)).collect();
                    methods.extend(self.interface_methods(&included, &args, building)?);
                }
                Member::MethodDefinition(def) => {
                    methods.insert(
                        def.name.clone(),
                        MethodRecord {
                            name: def.name.clone(),
                            accessibility: Accessibility::Public,
                            defined_in: Some(name.clone()),
                            implemented_in: name.clone(),
                            method_types: def.types.iter().map(|ty| ty.sub(&sub)).collect(),
                        },
                    );
                }
                Member::Alias(alias) => {
                    let original = methods.get(&alias.old_name).cloned().ok_or_else(|| {
                        BuildError::UnknownMethodAlias {
                            type_name: name.clone(),
                            new_name: alias.new_name.clone(),
                            old_name: alias.old_name.clone(),
                        }
                    })?;
                    methods.insert(
                        alias.new_name.clone(),
                        MethodRecord {
                            name: alias.new_name.clone(),
                            ..original
                        },
                    );
                }
                _ => {}
            }
        }
        building.pop();
        Ok(methods)
    }
}

fn insert_reader(
    attr: &Attribute,
    sub: &Substitution,
    section: Accessibility,
    owner: &TypeName,
    methods: &mut MethodTable,
) {
    let function = FunctionType::returning(attr.ty.sub(sub));
    insert_attribute(attr.name.clone(), function, attr, section, owner, methods);
}

fn insert_writer(
    attr: &Attribute,
    sub: &Substitution,
    section: Accessibility,
    owner: &TypeName,
    methods: &mut MethodTable,
) {
    let ty = attr.ty.sub(sub);
    let mut function = FunctionType::returning(ty.clone());
    function
        .required_positionals
        .push(Param::new(ty, Some(attr.name.clone())));
    let name = SmolStr::new(format!("{}=", attr.name));
    insert_attribute(name, function, attr, section, owner, methods);
}

fn insert_attribute(
    name: SmolStr,
    function: FunctionType,
    attr: &Attribute,
    section: Accessibility,
    owner: &TypeName,
    methods: &mut MethodTable,
) {
    methods.insert(
        name.clone(),
        MethodRecord {
            name,
            accessibility: attr.visibility.map(Accessibility::from).unwrap_or(section),
            defined_in: Some(owner.clone()),
            implemented_in: owner.clone(),
            method_types: vec![MethodType::new(function)],
        },
    );
}
