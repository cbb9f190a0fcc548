//! `list`: declared type names filtered by kind.

use std::io::Write;

use super::{CommandError, load_environment, render, write_lines};
use crate::project::{DeclarationKind, Environment, LoaderConfig};

/// Matching names sorted by their root-relative spelling.
pub fn query(env: &Environment, kinds: &[DeclarationKind]) -> Vec<String> {
    let mut entries: Vec<_> = env
        .each_declared_name()
        .filter(|(_, kind)| kinds.contains(kind))
        .map(|(name, kind)| (name.relative().to_string(), render::list_line(name, kind)))
        .collect();
    entries.sort();
    entries.into_iter().map(|(_, line)| line).collect()
}

pub fn run(
    config: LoaderConfig,
    kinds: &[DeclarationKind],
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let env = load_environment(config)?;
    write_lines(out, &query(&env, kinds))
}
