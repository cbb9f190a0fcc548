//! Loads signature sources into an [`Environment`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::environment::Environment;
use super::file_loader;
use super::stdlib;
use crate::base::LineCol;
use crate::parser::SyntaxError;

/// A syntax error with its 1-based position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedError {
    pub position: LineCol,
    pub error: SyntaxError,
}

impl fmt::Display for LocatedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}",
            self.position.line, self.position.col, self.error.message
        )
    }
}

fn render_syntax_errors(path: &std::path::Path, errors: &[LocatedError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}:{error}", path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors that abort loading an environment.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}", render_syntax_errors(.path, .errors))]
    Syntax {
        path: PathBuf,
        errors: Vec<LocatedError>,
    },

    #[error("Unknown library: {0}")]
    UnknownLibrary(String),

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Duplicate declaration of {name} in {}", .path.display())]
    DuplicateDeclaration { name: String, path: PathBuf },
}

/// What to load: the bundled core, named libraries and signature paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    libraries: Vec<String>,
    paths: Vec<PathBuf>,
    no_stdlib: bool,
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_library(mut self, name: impl Into<String>) -> Self {
        self.libraries.push(name.into());
        self
    }

    pub fn add_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    pub fn disable_standard_library(mut self) -> Self {
        self.no_stdlib = true;
        self
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn no_stdlib(&self) -> bool {
        self.no_stdlib
    }
}

/// Loads sources in order: core, libraries, then paths.
pub struct EnvironmentLoader {
    config: LoaderConfig,
}

impl EnvironmentLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every configured source into `env`. Stops at the first error.
    pub fn load(&self, env: &mut Environment) -> Result<(), LoadError> {
        if !self.config.no_stdlib {
            tracing::debug!("Loading core library ({} files)", stdlib::CORE.len());
            for (file, text) in stdlib::CORE {
                env.add_source(stdlib::virtual_path("core", file), text)?;
            }
        }

        for library in &self.config.libraries {
            let files = stdlib::library(library)
                .ok_or_else(|| LoadError::UnknownLibrary(library.clone()))?;
            tracing::debug!("Loading library {library}");
            for (file, text) in files {
                env.add_source(stdlib::virtual_path(library, file), text)?;
            }
        }

        for path in &self.config.paths {
            if !path.exists() {
                return Err(LoadError::PathNotFound(path.clone()));
            }
            let files = file_loader::collect_signature_files(path)?;
            tracing::debug!("Loading {} file(s) from {}", files.len(), path.display());
            for file in files {
                let text = file_loader::read_source(&file)?;
                env.add_source(&file, &text)?;
            }
        }

        Ok(())
    }
}
