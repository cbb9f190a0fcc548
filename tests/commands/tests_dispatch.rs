//! End-to-end dispatch from parsed arguments to output.

use std::fs;

use clap::Parser;
use rstest::rstest;
use sigq::cli::Cli;
use sigq::commands::{self, CommandError};
use sigq::project::LoadError;
use tempfile::TempDir;

fn run(args: &[&str]) -> Result<String, CommandError> {
    let cli = Cli::try_parse_from(std::iter::once("sigq").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut out = Vec::new();
    commands::run(&cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn signature_dir(text: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("foo.sig"), text).unwrap();
    dir
}

const HELP: &str = "Available commands:
  ast
  list
  ancestors
  methods
  method
  version
";

#[rstest]
#[case(&[])]
#[case(&["frobnicate"])]
#[case(&["frobnicate", "--flag", "x"])]
fn test_unknown_or_missing_command_prints_help(#[case] args: &[&str]) {
    assert_eq!(run(args).unwrap(), HELP);
}

#[test]
fn test_version() {
    assert_eq!(run(&["version"]).unwrap(), "sigq 0.1.0\n");
}

#[test]
fn test_method_arity_is_checked_before_loading() {
    let output = run(&["-I", "/definitely/not/here", "method", "Foo"]).unwrap();
    assert_eq!(output, "Expected two arguments, but given 1.\n");

    let output = run(&["method", "Foo", "bar", "baz"]).unwrap();
    assert_eq!(output, "Expected two arguments, but given 3.\n");
}

#[test]
fn test_method_from_signature_dir() {
    let dir = signature_dir("class Foo\n  def bar: (Integer) -> String\n         | (String) -> Integer\nend\n");
    let path = dir.path().to_str().unwrap();
    let output = run(&["--no-stdlib", "-I", path, "method", "Foo", "bar"]).unwrap();
    assert_eq!(
        output,
        "Foo#bar
  defined_in: Foo
  implementation: Foo
  accessibility: public
  types:
      (Integer) -> String
    | (String) -> Integer
"
    );

    let output = run(&["--no-stdlib", "-I", path, "method", "Foo", "qux"]).unwrap();
    assert_eq!(output, "Cannot find method: qux\n");
}

#[test]
fn test_list_kind_flags() {
    let dir = signature_dir("class A end\nmodule B end\ninterface _C end\n");
    let path = dir.path().to_str().unwrap();
    let output = run(&["--no-stdlib", "-I", path, "list", "--class", "--module"]).unwrap();
    assert_eq!(output, "A (class)\nB (module)\n");
}

#[test]
fn test_last_kind_flag_wins() {
    let dir = signature_dir("class Foo\n  def self.make: () -> Foo\nend\n");
    let path = dir.path().to_str().unwrap();
    let output = run(&[
        "--no-stdlib", "-I", path, "methods", "Foo", "--instance", "--singleton", "--no-inherit",
    ])
    .unwrap();
    assert_eq!(output, "make (public)\n");

    let output = run(&[
        "--no-stdlib", "-I", path, "methods", "Foo", "--singleton", "--instance",
    ])
    .unwrap();
    assert_eq!(output, "");
}

#[test]
fn test_unknown_type_is_not_fatal() {
    let output = run(&["ancestors", "Nope", "--singleton"]).unwrap();
    assert_eq!(output, "Cannot find class: Nope\n");
}

#[test]
fn test_load_errors_abort() {
    let err = run(&["-r", "missing", "list"]).unwrap_err();
    assert!(matches!(err, CommandError::Load(LoadError::UnknownLibrary(_))));
    assert_eq!(err.to_string(), "Unknown library: missing");
}

#[test]
fn test_ast_dump_includes_core() {
    let output = run(&["ast"]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|decl| decl["name"].as_str())
        .collect();
    assert!(names.contains(&"BasicObject"));
    assert!(names.contains(&"Kernel"));
}
