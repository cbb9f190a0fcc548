//! `method`: the detail block of a single method.

use std::io::Write;

use smol_str::SmolStr;

use super::{CommandError, QueryError, build_definition, load_environment, render, report};
use crate::base::parse_type_name;
use crate::hir::DefinitionKind;
use crate::project::{Environment, LoaderConfig};

pub fn query(
    env: &Environment,
    type_name: &str,
    method_name: &str,
    kind: DefinitionKind,
) -> Result<Vec<String>, QueryError> {
    let name = parse_type_name(type_name)?;
    let definition = build_definition(env, &name, kind)?;
    let method = definition
        .method(method_name)
        .ok_or_else(|| QueryError::UnknownMethod(SmolStr::new(method_name)))?;
    Ok(render::method_detail_lines(&definition, method))
}

/// Takes exactly `TYPE METHOD`; the arity is checked before anything is
/// loaded.
pub fn run(
    config: LoaderConfig,
    args: &[String],
    kind: DefinitionKind,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let [type_name, method_name] = args else {
        return report(out, Err(QueryError::Arity { actual: args.len() }));
    };
    let env = load_environment(config)?;
    report(out, query(&env, type_name, method_name, kind))
}
