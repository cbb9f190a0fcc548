//! Environment loading: the bundled core library, named libraries and
//! signature directories.

mod env_loader;
mod environment;
pub mod file_loader;
pub mod stdlib;

pub use env_loader::{EnvironmentLoader, LoadError, LoaderConfig, LocatedError};
pub use environment::{DeclarationKind, Environment, ExtensionEntry, SourceFile, TypeDecl};
