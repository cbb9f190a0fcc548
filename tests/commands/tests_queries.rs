//! Query functions behind each command.

use rstest::rstest;
use sigq::commands::{QueryError, ancestors, ast, list, method, methods};
use sigq::project::DeclarationKind;
use sigq::{DefinitionKind, hir::BuildError};

use crate::helpers::env_helpers::{CORE, env_from_sig, env_with_core};

const FOO_BAR: &str = "class Foo
  def bar: (Integer) -> String
         | (String) -> Integer
end";

#[test]
fn test_list_filters_and_sorts() {
    let env = env_from_sig("module B end\ninterface _C end\nclass A end");
    assert_eq!(
        list::query(&env, &[DeclarationKind::Class, DeclarationKind::Module]),
        vec!["A (class)", "B (module)"]
    );
    assert_eq!(
        list::query(&env, &[DeclarationKind::Interface]),
        vec!["_C (interface)"]
    );
}

#[test]
fn test_list_sorts_nested_names() {
    let env = env_from_sig("class Zoo end\nmodule App\n  class Zebra end\nend");
    assert_eq!(
        list::query(
            &env,
            &[DeclarationKind::Class, DeclarationKind::Module]
        ),
        vec!["App (module)", "App::Zebra (class)", "Zoo (class)"]
    );
}

#[test]
fn test_method_detail_block() {
    let env = env_from_sig(FOO_BAR);
    assert_eq!(
        method::query(&env, "Foo", "bar", DefinitionKind::Instance).unwrap(),
        vec![
            "Foo#bar",
            "  defined_in: Foo",
            "  implementation: Foo",
            "  accessibility: public",
            "  types:",
            "      (Integer) -> String",
            "    | (String) -> Integer",
        ]
    );
}

#[test]
fn test_singleton_method_detail_uses_dot() {
    let env = env_with_core("class Foo end");
    let lines = method::query(&env, "Foo", "new", DefinitionKind::Singleton).unwrap();
    assert_eq!(lines[0], "Foo.new");
    assert_eq!(lines[1], "  defined_in: unknown");
    assert_eq!(lines[5], "      () -> instance");
}

#[test]
fn test_inherited_method_detail() {
    let lines = method::query(&CORE, "Integer", "hash", DefinitionKind::Instance).unwrap();
    assert_eq!(
        lines[..4],
        ["Integer#hash", "  defined_in: Object", "  implementation: Object", "  accessibility: public"]
    );
}

#[test]
fn test_unknown_method() {
    let env = env_from_sig(FOO_BAR);
    let err = method::query(&env, "Foo", "baz", DefinitionKind::Instance).unwrap_err();
    assert_eq!(err, QueryError::UnknownMethod("baz".into()));
    assert_eq!(err.to_string(), "Cannot find method: baz");
}

#[rstest]
#[case("Missing")]
#[case("_Interface")]
fn test_ancestors_of_unknown_class(#[case] name: &str) {
    let env = env_from_sig("interface _Interface end");
    let err = ancestors::query(&env, name, DefinitionKind::Instance).unwrap_err();
    assert!(matches!(err, QueryError::Build(BuildError::UnknownType(_))));
    assert_eq!(err.to_string(), format!("Cannot find class: {name}"));
}

#[rstest]
#[case("")]
#[case("Foo::")]
#[case("Foo::1Bar")]
fn test_malformed_type_name(#[case] name: &str) {
    let err = methods::query(&CORE, name, DefinitionKind::Instance, true).unwrap_err();
    assert!(matches!(err, QueryError::Name(_)), "{err:?}");
}

#[test]
fn test_ancestors_query() {
    assert_eq!(
        ancestors::query(&CORE, "::Integer", DefinitionKind::Instance).unwrap(),
        vec!["Integer", "Numeric", "Comparable", "Object", "Kernel", "BasicObject"]
    );
}

#[test]
fn test_methods_query_respects_inherit() {
    let env = env_with_core(
        "class Foo
           def bar: () -> void
           private
           def baz: () -> void
         end",
    );
    assert_eq!(
        methods::query(&env, "Foo", DefinitionKind::Instance, false).unwrap(),
        vec!["bar (public)", "baz (private)"]
    );
    let all = methods::query(&env, "Foo", DefinitionKind::Instance, true).unwrap();
    assert!(all.contains(&"to_s (public)".to_string()));
    assert!(all.contains(&"initialize (private)".to_string()));
    let mut sorted = all.clone();
    sorted.sort();
    assert_eq!(all, sorted);
}

#[test]
fn test_ast_is_a_json_array_of_declarations() {
    let env = env_from_sig("class A < B\n  def a: () -> void\nend\n$out: IO");
    let json: serde_json::Value = serde_json::from_str(&ast::query(&env).unwrap()).unwrap();
    let declarations = json.as_array().unwrap();
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0]["declaration"], "class");
    assert_eq!(declarations[0]["name"], "A");
    assert_eq!(declarations[0]["members"][0]["member"], "method_definition");
    assert_eq!(declarations[1]["declaration"], "global");
}
