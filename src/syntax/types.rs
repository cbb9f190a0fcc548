//! Structured signature types.
//!
//! Every type renders back to canonical signature syntax through `Display`,
//! which is what the query commands print for method overloads and ancestor
//! arguments.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

use super::substitution::Substitution;
use crate::base::TypeName;

/// A literal type such as `1`, `"foo"`, `:sym` or `true`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Integer(i64),
    /// Contents between the quotes, escapes kept as written
    String(SmolStr),
    Symbol(SmolStr),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::String(value) => write!(f, "\"{value}\""),
            Literal::Symbol(value) => write!(f, ":{value}"),
            Literal::Bool(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Void,
    Untyped,
    Bool,
    Nil,
    Top,
    Bot,
    #[serde(rename = "self")]
    SelfType,
    Instance,
    Class,
    Variable {
        name: SmolStr,
    },
    ClassInstance {
        name: TypeName,
        args: Vec<Type>,
    },
    ClassSingleton {
        name: TypeName,
    },
    Interface {
        name: TypeName,
        args: Vec<Type>,
    },
    Alias {
        name: TypeName,
    },
    Tuple {
        types: Vec<Type>,
    },
    Record {
        fields: IndexMap<SmolStr, Type>,
    },
    Optional {
        ty: Box<Type>,
    },
    Union {
        types: Vec<Type>,
    },
    Intersection {
        types: Vec<Type>,
    },
    Proc {
        function: Box<FunctionType>,
    },
    Literal {
        literal: Literal,
    },
}

impl Type {
    pub fn variable(name: impl Into<SmolStr>) -> Self {
        Type::Variable { name: name.into() }
    }

    /// Replace type variables according to `sub`.
    pub fn sub(&self, sub: &Substitution) -> Type {
        if sub.is_empty() {
            return self.clone();
        }
        match self {
            Type::Variable { name } => sub.lookup(name).cloned().unwrap_or_else(|| self.clone()),
            Type::ClassInstance { name, args } => Type::ClassInstance {
                name: name.clone(),
                args: args.iter().map(|a| a.sub(sub)).collect(),
            },
            Type::Interface { name, args } => Type::Interface {
                name: name.clone(),
                args: args.iter().map(|a| a.sub(sub)).collect(),
            },
            Type::Tuple { types } => Type::Tuple {
                types: types.iter().map(|t| t.sub(sub)).collect(),
            },
            Type::Record { fields } => Type::Record {
                fields: fields
                    .iter()
                    .map(|(key, ty)| (key.clone(), ty.sub(sub)))
                    .collect(),
            },
            Type::Optional { ty } => Type::Optional {
                ty: Box::new(ty.sub(sub)),
            },
            Type::Union { types } => Type::Union {
                types: types.iter().map(|t| t.sub(sub)).collect(),
            },
            Type::Intersection { types } => Type::Intersection {
                types: types.iter().map(|t| t.sub(sub)).collect(),
            },
            Type::Proc { function } => Type::Proc {
                function: Box::new(function.sub(sub)),
            },
            _ => self.clone(),
        }
    }

    /// Whether the type needs parentheses when used as an operand of `?`,
    /// `&` or a return position.
    fn is_compound(&self) -> bool {
        matches!(
            self,
            Type::Union { .. } | Type::Intersection { .. } | Type::Proc { .. }
        )
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Type]) -> fmt::Result {
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("[")?;
    write_joined(f, args, ", ")?;
    f.write_str("]")
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Untyped => f.write_str("untyped"),
            Type::Bool => f.write_str("bool"),
            Type::Nil => f.write_str("nil"),
            Type::Top => f.write_str("top"),
            Type::Bot => f.write_str("bot"),
            Type::SelfType => f.write_str("self"),
            Type::Instance => f.write_str("instance"),
            Type::Class => f.write_str("class"),
            Type::Variable { name } => f.write_str(name),
            Type::ClassInstance { name, args } | Type::Interface { name, args } => {
                write!(f, "{name}")?;
                write_args(f, args)
            }
            Type::ClassSingleton { name } => write!(f, "singleton({name})"),
            Type::Alias { name } => write!(f, "{name}"),
            Type::Tuple { types } if types.is_empty() => f.write_str("[ ]"),
            Type::Tuple { types } => {
                f.write_str("[")?;
                write_joined(f, types, ", ")?;
                f.write_str("]")
            }
            Type::Record { fields } => {
                f.write_str("{ ")?;
                for (i, (key, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {ty}")?;
                }
                f.write_str(" }")
            }
            Type::Optional { ty } if ty.is_compound() => write!(f, "({ty})?"),
            Type::Optional { ty } => write!(f, "{ty}?"),
            Type::Union { types } => {
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    if matches!(ty, Type::Union { .. }) {
                        write!(f, "({ty})")?;
                    } else {
                        write!(f, "{ty}")?;
                    }
                }
                Ok(())
            }
            Type::Intersection { types } => {
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    if ty.is_compound() {
                        write!(f, "({ty})")?;
                    } else {
                        write!(f, "{ty}")?;
                    }
                }
                Ok(())
            }
            Type::Proc { function } => write!(f, "^{function}"),
            Type::Literal { literal } => write!(f, "{literal}"),
        }
    }
}

/// A parameter with an optional name, `Integer size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: Type,
    pub name: Option<SmolStr>,
}

impl Param {
    pub fn new(ty: Type, name: Option<SmolStr>) -> Self {
        Self { ty, name }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self { ty, name: None }
    }

    fn sub(&self, sub: &Substitution) -> Param {
        Param {
            ty: self.ty.sub(sub),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {name}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Parameters and return type of a method, block or proc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionType {
    pub required_positionals: Vec<Param>,
    pub optional_positionals: Vec<Param>,
    pub rest_positionals: Option<Param>,
    pub trailing_positionals: Vec<Param>,
    pub required_keywords: IndexMap<SmolStr, Param>,
    pub optional_keywords: IndexMap<SmolStr, Param>,
    pub rest_keywords: Option<Param>,
    pub return_type: Type,
}

impl FunctionType {
    /// A function with no parameters.
    pub fn returning(return_type: Type) -> Self {
        Self {
            required_positionals: Vec::new(),
            optional_positionals: Vec::new(),
            rest_positionals: None,
            trailing_positionals: Vec::new(),
            required_keywords: IndexMap::new(),
            optional_keywords: IndexMap::new(),
            rest_keywords: None,
            return_type,
        }
    }

    pub fn with_return_type(&self, return_type: Type) -> Self {
        Self {
            return_type,
            ..self.clone()
        }
    }

    pub fn sub(&self, sub: &Substitution) -> Self {
        Self {
            required_positionals: self.required_positionals.iter().map(|p| p.sub(sub)).collect(),
            optional_positionals: self.optional_positionals.iter().map(|p| p.sub(sub)).collect(),
            rest_positionals: self.rest_positionals.as_ref().map(|p| p.sub(sub)),
            trailing_positionals: self.trailing_positionals.iter().map(|p| p.sub(sub)).collect(),
            required_keywords: self
                .required_keywords
                .iter()
                .map(|(k, p)| (k.clone(), p.sub(sub)))
                .collect(),
            optional_keywords: self
                .optional_keywords
                .iter()
                .map(|(k, p)| (k.clone(), p.sub(sub)))
                .collect(),
            rest_keywords: self.rest_keywords.as_ref().map(|p| p.sub(sub)),
            return_type: self.return_type.sub(sub),
        }
    }

    fn param_strings(&self) -> Vec<String> {
        let mut params = Vec::new();
        params.extend(self.required_positionals.iter().map(|p| p.to_string()));
        params.extend(self.optional_positionals.iter().map(|p| format!("?{p}")));
        if let Some(rest) = &self.rest_positionals {
            params.push(format!("*{rest}"));
        }
        params.extend(self.trailing_positionals.iter().map(|p| p.to_string()));
        params.extend(self.required_keywords.iter().map(|(k, p)| format!("{k}: {p}")));
        params.extend(self.optional_keywords.iter().map(|(k, p)| format!("?{k}: {p}")));
        if let Some(rest) = &self.rest_keywords {
            params.push(format!("**{rest}"));
        }
        params
    }

    fn write_params(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.param_strings().join(", "))
    }

    fn write_return(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.return_type.is_compound() {
            write!(f, "-> ({})", self.return_type)
        } else {
            write!(f, "-> {}", self.return_type)
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_params(f)?;
        f.write_str(" ")?;
        self.write_return(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub function: FunctionType,
    pub required: bool,
}

/// One overload of a method: `[T] (T) { (T) -> void } -> T`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodType {
    pub type_params: Vec<SmolStr>,
    #[serde(rename = "type")]
    pub function: FunctionType,
    pub block: Option<Block>,
}

impl MethodType {
    pub fn new(function: FunctionType) -> Self {
        Self {
            type_params: Vec::new(),
            function,
            block: None,
        }
    }

    /// Substitute outer type variables; the method's own parameters shadow
    /// any binding of the same name.
    pub fn sub(&self, sub: &Substitution) -> Self {
        let sub = sub.without(&self.type_params);
        Self {
            type_params: self.type_params.clone(),
            function: self.function.sub(&sub),
            block: self.block.as_ref().map(|block| Block {
                function: block.function.sub(&sub),
                required: block.required,
            }),
        }
    }

    pub fn with_return_type(&self, return_type: Type) -> Self {
        Self {
            type_params: self.type_params.clone(),
            function: self.function.with_return_type(return_type),
            block: self.block.clone(),
        }
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.type_params.is_empty() {
            write!(f, "[{}] ", self.type_params.join(", "))?;
        }
        self.function.write_params(f)?;
        if let Some(block) = &self.block {
            if !block.required {
                f.write_str(" ?")?;
            } else {
                f.write_str(" ")?;
            }
            write!(f, "{{ {} }}", block.function)?;
        }
        f.write_str(" ")?;
        self.function.write_return(f)
    }
}
