//! Environment fixtures shared by the integration tests.

use once_cell::sync::Lazy;
use sigq::hir::{Definition, DefinitionBuilder};
use sigq::project::{Environment, EnvironmentLoader, LoaderConfig};
use sigq::{DefinitionKind, parse_type_name};

/// The bundled core library, loaded once.
pub static CORE: Lazy<Environment> = Lazy::new(|| env_with_core(""));

/// An environment holding only `source`.
pub fn env_from_sig(source: &str) -> Environment {
    let mut env = Environment::new();
    env.add_source("test.sig", source)
        .unwrap_or_else(|err| panic!("Failed to load test source:\n{err}"));
    env
}

/// The core library plus `source`.
pub fn env_with_core(source: &str) -> Environment {
    let mut env = Environment::new();
    EnvironmentLoader::new(LoaderConfig::new())
        .load(&mut env)
        .expect("core library should load");
    if !source.is_empty() {
        env.add_source("test.sig", source)
            .unwrap_or_else(|err| panic!("Failed to load test source:\n{err}"));
    }
    env
}

/// Rendered ancestor chain of `name`.
pub fn ancestor_strings(env: &Environment, name: &str, kind: DefinitionKind) -> Vec<String> {
    definition(env, name, kind)
        .ancestors
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn definition(env: &Environment, name: &str, kind: DefinitionKind) -> Definition {
    let name = parse_type_name(name).expect("valid type name");
    let builder = DefinitionBuilder::new(env);
    let result = match kind {
        DefinitionKind::Instance => builder.build_instance(&name),
        DefinitionKind::Singleton => builder.build_singleton(&name),
    };
    result.unwrap_or_else(|err| panic!("Failed to build {name}: {err}"))
}

/// Rendered overloads of one method.
pub fn method_types(definition: &Definition, method: &str) -> Vec<String> {
    definition
        .method(method)
        .unwrap_or_else(|| panic!("{method} should exist"))
        .method_types
        .iter()
        .map(ToString::to_string)
        .collect()
}
