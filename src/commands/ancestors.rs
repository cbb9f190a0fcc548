//! `ancestors`: the linearized ancestor chain of a type.

use std::io::Write;

use super::{CommandError, QueryError, load_environment, render, report};
use crate::base::parse_type_name;
use crate::hir::{Ancestor, BuildError, DefinitionBuilder, DefinitionKind};
use crate::project::{Environment, LoaderConfig};

pub fn query(
    env: &Environment,
    type_name: &str,
    kind: DefinitionKind,
) -> Result<Vec<String>, QueryError> {
    let name = parse_type_name(type_name)?;
    if !env.is_class_or_module(&name) {
        return Err(BuildError::UnknownType(name).into());
    }
    let root = match (kind, env.find_declaration(&name)) {
        (DefinitionKind::Instance, Some(decl)) => Ancestor::instance_root(decl),
        _ => Ancestor::singleton(name),
    };
    let ancestors = DefinitionBuilder::new(env).build_ancestors(&root)?;
    Ok(render::ancestor_lines(&ancestors))
}

pub fn run(
    config: LoaderConfig,
    type_name: &str,
    kind: DefinitionKind,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let env = load_environment(config)?;
    report(out, query(&env, type_name, kind))
}
