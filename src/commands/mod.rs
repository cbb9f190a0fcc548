//! Query commands.
//!
//! Every loading command builds a fresh environment from the loader
//! configuration, runs one query and writes the resulting lines. Query
//! failures are reported as a single output line; load and output failures
//! abort the command.

pub mod ancestors;
pub mod ast;
pub mod list;
pub mod method;
pub mod methods;
pub mod render;
pub mod version;

use std::io::{self, Write};

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{NameError, TypeName};
use crate::cli::{Cli, Command};
use crate::hir::{BuildError, Definition, DefinitionBuilder, DefinitionKind};
use crate::project::{Environment, EnvironmentLoader, LoadError, LoaderConfig};

/// Non-fatal failures, reported on the output as one line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Cannot find method: {0}")]
    UnknownMethod(SmolStr),

    #[error("Expected two arguments, but given {actual}.")]
    Arity { actual: usize },
}

/// Failures that abort a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize declarations: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dispatch a parsed command line, writing results to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<(), CommandError> {
    let config = cli.loader_config();
    match &cli.command {
        None | Some(Command::Unknown(_)) => write_lines(out, &render::help_lines()),
        Some(Command::Version) => version::run(out),
        Some(Command::Ast) => ast::run(config, out),
        Some(Command::List(args)) => list::run(config, &args.kinds(), out),
        Some(Command::Ancestors { type_name, kind }) => {
            ancestors::run(config, type_name, kind.kind(), out)
        }
        Some(Command::Methods {
            type_name,
            kind,
            no_inherit,
            ..
        }) => methods::run(config, type_name, kind.kind(), !no_inherit, out),
        Some(Command::Method { args, kind }) => method::run(config, args, kind.kind(), out),
    }
}

/// Load a fresh environment.
pub fn load_environment(config: LoaderConfig) -> Result<Environment, LoadError> {
    let mut env = Environment::new();
    EnvironmentLoader::new(config).load(&mut env)?;
    Ok(env)
}

/// Build the instance or singleton definition of `name`.
pub(crate) fn build_definition(
    env: &Environment,
    name: &TypeName,
    kind: DefinitionKind,
) -> Result<Definition, BuildError> {
    let builder = DefinitionBuilder::new(env);
    match kind {
        DefinitionKind::Instance => builder.build_instance(name),
        DefinitionKind::Singleton => builder.build_singleton(name),
    }
}

pub(crate) fn write_lines(out: &mut dyn Write, lines: &[String]) -> Result<(), CommandError> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Write query output, or the query error as a single line.
pub(crate) fn report(
    out: &mut dyn Write,
    result: Result<Vec<String>, QueryError>,
) -> Result<(), CommandError> {
    match result {
        Ok(lines) => write_lines(out, &lines),
        Err(err) => {
            tracing::debug!("Query failed: {err:?}");
            writeln!(out, "{err}")?;
            Ok(())
        }
    }
}
