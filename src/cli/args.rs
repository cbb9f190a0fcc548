// src/cli/args.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::hir::DefinitionKind;
use crate::project::{DeclarationKind, LoaderConfig};

/// Query type signature environments
#[derive(Parser, Debug)]
#[command(name = "sigq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query ancestors and methods of type signatures", long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Load a bundled library (repeatable)
    #[arg(short = 'r', value_name = "LIB")]
    pub libraries: Vec<String>,

    /// Load signatures from a file or directory (repeatable)
    #[arg(short = 'I', value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Do not load the bundled core library
    #[arg(long)]
    pub no_stdlib: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The loader configuration described by the global options.
    pub fn loader_config(&self) -> LoaderConfig {
        let mut config = LoaderConfig::new();
        for library in &self.libraries {
            config = config.add_library(library.clone());
        }
        for path in &self.paths {
            config = config.add_path(path.clone());
        }
        if self.no_stdlib {
            config = config.disable_standard_library();
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the loaded declarations as JSON
    Ast,
    /// List declared classes, modules and interfaces
    List(ListArgs),
    /// Print the ancestor chain of a type
    Ancestors {
        #[arg(value_name = "TYPE")]
        type_name: String,

        #[command(flatten)]
        kind: KindArgs,
    },
    /// List the methods of a type
    Methods {
        #[arg(value_name = "TYPE")]
        type_name: String,

        #[command(flatten)]
        kind: KindArgs,

        /// Include inherited methods (default)
        #[arg(long, overrides_with = "no_inherit")]
        inherit: bool,

        /// Only methods implemented by the type itself
        #[arg(long, overrides_with = "inherit")]
        no_inherit: bool,
    },
    /// Show the overloads of one method
    Method {
        /// TYPE and METHOD
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        #[command(flatten)]
        kind: KindArgs,
    },
    /// Show version information
    Version,

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Command names in help order.
    pub const NAMES: &'static [&'static str] =
        &["ast", "list", "ancestors", "methods", "method", "version"];
}

/// `--instance` / `--singleton`; the last one given wins.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindArgs {
    /// Query the instance side (default)
    #[arg(long, overrides_with = "singleton")]
    pub instance: bool,

    /// Query the singleton side
    #[arg(long, overrides_with = "instance")]
    pub singleton: bool,
}

impl KindArgs {
    pub fn kind(&self) -> DefinitionKind {
        if self.singleton {
            DefinitionKind::Singleton
        } else {
            DefinitionKind::Instance
        }
    }
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Include classes
    #[arg(long)]
    pub class: bool,

    /// Include modules
    #[arg(long)]
    pub module: bool,

    /// Include interfaces
    #[arg(long)]
    pub interface: bool,
}

impl ListArgs {
    /// Selected kinds; all of them when none is selected.
    pub fn kinds(&self) -> Vec<DeclarationKind> {
        let selected: Vec<_> = [
            (self.class, DeclarationKind::Class),
            (self.module, DeclarationKind::Module),
            (self.interface, DeclarationKind::Interface),
        ]
        .into_iter()
        .filter_map(|(on, kind)| on.then_some(kind))
        .collect();
        if selected.is_empty() {
            vec![
                DeclarationKind::Class,
                DeclarationKind::Module,
                DeclarationKind::Interface,
            ]
        } else {
            selected
        }
    }
}
