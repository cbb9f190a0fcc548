//! `ast`: dump loaded declarations as JSON.

use std::io::Write;

use super::{CommandError, load_environment};
use crate::project::{Environment, LoaderConfig};
use crate::syntax::Declaration;

/// All top-level declarations as one pretty-printed JSON array.
pub fn query(env: &Environment) -> Result<String, serde_json::Error> {
    let declarations: Vec<&Declaration> = env.declarations().collect();
    serde_json::to_string_pretty(&declarations)
}

pub fn run(config: LoaderConfig, out: &mut dyn Write) -> Result<(), CommandError> {
    let env = load_environment(config)?;
    let json = query(&env)?;
    writeln!(out, "{json}")?;
    Ok(())
}
