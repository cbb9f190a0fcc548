//! Environment loading from bundled libraries and signature paths.

use std::fs;
use std::path::Path;

use rstest::rstest;
use sigq::parse_type_name;
use sigq::project::{DeclarationKind, Environment, EnvironmentLoader, LoadError, LoaderConfig};
use tempfile::TempDir;

fn load(config: LoaderConfig) -> Result<Environment, LoadError> {
    let mut env = Environment::new();
    EnvironmentLoader::new(config).load(&mut env)?;
    Ok(env)
}

fn write(dir: &Path, relative: &str, text: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn declared(env: &Environment, name: &str) -> bool {
    env.find_declaration(&parse_type_name(name).unwrap()).is_some()
}

#[test]
fn test_core_library_loads() {
    let env = load(LoaderConfig::new()).unwrap();
    for name in ["BasicObject", "Object", "Kernel", "Class", "Module", "Integer", "Array"] {
        assert!(declared(&env, name), "{name} should be declared");
    }
    assert!(!declared(&env, "Set"));
    assert!(env.sources().iter().all(|s| s.path.starts_with("<core>")));
}

#[rstest]
#[case("set", "Set")]
#[case("pathname", "Pathname")]
fn test_bundled_library(#[case] library: &str, #[case] type_name: &str) {
    let env = load(LoaderConfig::new().add_library(library)).unwrap();
    assert!(declared(&env, type_name));
}

#[test]
fn test_no_stdlib_loads_nothing() {
    let env = load(LoaderConfig::new().disable_standard_library()).unwrap();
    assert_eq!(env.each_declared_name().count(), 0);
}

#[test]
fn test_directory_is_walked_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b.sig", "class B end");
    write(dir.path(), "a.sig", "class A end");
    write(dir.path(), "nested/c.sig", "module C end");
    write(dir.path(), "notes.txt", "class Ignored end");

    let env = load(
        LoaderConfig::new()
            .disable_standard_library()
            .add_path(dir.path()),
    )
    .unwrap();

    let files: Vec<_> = env
        .sources()
        .iter()
        .map(|s| s.path.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        files,
        vec![
            Path::new("a.sig").to_path_buf(),
            Path::new("b.sig").to_path_buf(),
            Path::new("nested/c.sig").to_path_buf(),
        ]
    );
    let kinds: Vec<_> = env.each_declared_name().map(|(_, kind)| kind).collect();
    assert_eq!(
        kinds,
        vec![DeclarationKind::Class, DeclarationKind::Class, DeclarationKind::Module]
    );
    assert!(!declared(&env, "Ignored"));
}

#[test]
fn test_single_file_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "only.sig", "class Only < Object end");
    let env = load(LoaderConfig::new().add_path(dir.path().join("only.sig"))).unwrap();
    assert!(declared(&env, "Only"));
}

#[test]
fn test_unknown_library() {
    let err = load(LoaderConfig::new().add_library("nope")).unwrap_err();
    assert!(matches!(err, LoadError::UnknownLibrary(ref name) if name == "nope"));
}

#[test]
fn test_missing_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let err = load(LoaderConfig::new().add_path(&missing)).unwrap_err();
    assert_eq!(err.to_string(), format!("Path not found: {}", missing.display()));
}

#[test]
fn test_syntax_error_reports_position() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.sig", "class Foo\n  def bar: () ->\nend\n");
    let err = load(
        LoaderConfig::new()
            .disable_standard_library()
            .add_path(dir.path()),
    )
    .unwrap_err();
    let LoadError::Syntax { ref errors, .. } = err else {
        panic!("expected a syntax error, got {err:?}");
    };
    assert_eq!((errors[0].position.line, errors[0].position.col), (3, 1));
    assert!(err.to_string().contains("bad.sig:3:1: "));
}

#[test]
fn test_duplicate_declaration_across_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.sig", "class Foo end");
    write(dir.path(), "b.sig", "module Outer\nend\nclass Foo end");
    let err = load(
        LoaderConfig::new()
            .disable_standard_library()
            .add_path(dir.path()),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::DuplicateDeclaration { ref name, .. } if name == "Foo"));
}

#[test]
fn test_user_signatures_extend_core() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ext.sig", "extension String (Shouting)\n  def shout: () -> String\nend");
    let env = load(LoaderConfig::new().add_path(dir.path())).unwrap();
    assert_eq!(env.extensions_of(&parse_type_name("String").unwrap()).len(), 1);
}
