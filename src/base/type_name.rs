//! Qualified type names and the user-facing name parser.
//!
//! A [`TypeName`] is a simple name plus the [`Namespace`] it lives in.
//! Names written in signature files may be relative (`Bar`, `Foo::Bar`) and
//! are resolved against the declaring scope; names handed to queries are
//! always absolute (`::Foo::Bar`).

use std::fmt;

use serde::{Serialize, Serializer};
use smol_str::SmolStr;
use thiserror::Error;

/// Separator between namespace segments.
pub const SEPARATOR: &str = "::";

/// Errors produced by [`parse_type_name`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Type name is empty")]
    Empty,

    #[error("Invalid type name `{text}`: bad segment `{segment}`")]
    InvalidSegment { text: String, segment: String },
}

/// A namespace path such as `::Foo::Bar::`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    pub path: Vec<SmolStr>,
    pub absolute: bool,
}

impl Namespace {
    pub fn new(path: Vec<SmolStr>, absolute: bool) -> Self {
        Self { path, absolute }
    }

    /// The root namespace `::`.
    pub fn root() -> Self {
        Self {
            path: Vec::new(),
            absolute: true,
        }
    }

    /// The empty relative namespace.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Anchor this namespace at the root.
    pub fn absolute(&self) -> Self {
        Self {
            path: self.path.clone(),
            absolute: true,
        }
    }

    /// Concatenate two namespaces. An absolute `other` wins outright.
    pub fn append(&self, other: &Namespace) -> Self {
        if other.absolute {
            return other.clone();
        }
        let mut path = self.path.clone();
        path.extend(other.path.iter().cloned());
        Self {
            path,
            absolute: self.absolute,
        }
    }

    /// The enclosing namespace, or `None` at the top.
    pub fn parent(&self) -> Option<Namespace> {
        if self.path.is_empty() {
            return None;
        }
        Some(Self {
            path: self.path[..self.path.len() - 1].to_vec(),
            absolute: self.absolute,
        })
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.absolute {
            f.write_str(SEPARATOR)?;
        }
        for segment in &self.path {
            write!(f, "{segment}{SEPARATOR}")?;
        }
        Ok(())
    }
}

/// What a type name refers to, judging by its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeNameKind {
    /// `Foo`: class or module
    Class,
    /// `_Foo`
    Interface,
    /// `foo`: type alias
    Alias,
}

/// A namespace-qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    pub namespace: Namespace,
    pub name: SmolStr,
}

impl TypeName {
    pub fn new(namespace: Namespace, name: impl Into<SmolStr>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// A top-level absolute name, `::name`.
    pub fn root(name: impl Into<SmolStr>) -> Self {
        Self::new(Namespace::root(), name)
    }

    pub fn is_absolute(&self) -> bool {
        self.namespace.absolute
    }

    /// The same name anchored at the root.
    pub fn absolute(&self) -> Self {
        Self {
            namespace: self.namespace.absolute(),
            name: self.name.clone(),
        }
    }

    /// The same path without the root anchor, used for query output.
    pub fn relative(&self) -> Self {
        Self {
            namespace: Namespace::new(self.namespace.path.clone(), false),
            name: self.name.clone(),
        }
    }

    /// This name viewed as a namespace, `Foo::Bar` → `Foo::Bar::`.
    pub fn to_namespace(&self) -> Namespace {
        let mut path = self.namespace.path.clone();
        path.push(self.name.clone());
        Namespace::new(path, self.namespace.absolute)
    }

    /// Prefix a relative name with `namespace`; absolute names are unchanged.
    pub fn with_prefix(&self, namespace: &Namespace) -> Self {
        Self {
            namespace: namespace.append(&self.namespace),
            name: self.name.clone(),
        }
    }

    pub fn kind(&self) -> TypeNameKind {
        let mut chars = self.name.chars();
        match chars.next() {
            Some('_') if chars.next().is_some_and(char::is_uppercase) => TypeNameKind::Interface,
            Some(c) if c.is_uppercase() => TypeNameKind::Class,
            _ => TypeNameKind::Alias,
        }
    }

    pub fn is_class(&self) -> bool {
        self.kind() == TypeNameKind::Class
    }

    pub fn is_interface(&self) -> bool {
        self.kind() == TypeNameKind::Interface
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.name)
    }
}

impl Serialize for TypeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse user-supplied text such as `Foo::Bar` or `::Foo::Bar` into an
/// absolute [`TypeName`].
pub fn parse_type_name(text: &str) -> Result<TypeName, NameError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    let body = trimmed.strip_prefix(SEPARATOR).unwrap_or(trimmed);
    let mut segments: Vec<SmolStr> = Vec::new();
    for segment in body.split(SEPARATOR) {
        if !is_identifier(segment) {
            return Err(NameError::InvalidSegment {
                text: text.to_string(),
                segment: segment.to_string(),
            });
        }
        segments.push(SmolStr::new(segment));
    }

    // `split` always yields at least one segment
    let name = segments.pop().unwrap_or_default();
    Ok(TypeName::new(Namespace::new(segments, true), name))
}

fn is_identifier(segment: &str) -> bool {
    let rest = segment.strip_prefix('_').unwrap_or(segment);
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        // a lone `_` is not a name
        _ => false,
    }
}
