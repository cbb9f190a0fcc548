//! `methods`: method names of a type with their accessibility.

use std::io::Write;

use super::{CommandError, QueryError, build_definition, load_environment, render, report};
use crate::base::parse_type_name;
use crate::hir::DefinitionKind;
use crate::project::{Environment, LoaderConfig};

/// Sorted `name (accessibility)` lines. Without `inherit`, only methods
/// implemented by the type itself are kept.
pub fn query(
    env: &Environment,
    type_name: &str,
    kind: DefinitionKind,
    inherit: bool,
) -> Result<Vec<String>, QueryError> {
    let name = parse_type_name(type_name)?;
    let definition = build_definition(env, &name, kind)?;
    Ok(render::method_list_lines(&definition.sorted_methods(inherit)))
}

pub fn run(
    config: LoaderConfig,
    type_name: &str,
    kind: DefinitionKind,
    inherit: bool,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let env = load_environment(config)?;
    report(out, query(&env, type_name, kind, inherit))
}
