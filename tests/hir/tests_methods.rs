//! Method table composition.

use sigq::hir::{Accessibility, BuildError, DefinitionBuilder};
use sigq::{DefinitionKind, parse_type_name};

use crate::helpers::env_helpers::{CORE, definition, env_from_sig, env_with_core, method_types};

fn accessibilities(source: &str, name: &str, kind: DefinitionKind) -> Vec<(String, Accessibility)> {
    let env = env_from_sig(source);
    definition(&env, name, kind)
        .sorted_methods(false)
        .into_iter()
        .map(|method| (method.name.to_string(), method.accessibility))
        .collect()
}

// ============================================================================
// Overloads and aliases
// ============================================================================

#[test]
fn test_overloads_keep_declaration_order() {
    let env = env_from_sig(
        "class Foo
           def bar: (Integer) -> String
                  | (String) -> Integer
         end",
    );
    let foo = definition(&env, "Foo", DefinitionKind::Instance);
    assert_eq!(
        method_types(&foo, "bar"),
        vec!["(Integer) -> String", "(String) -> Integer"]
    );
}

#[test]
fn test_overloading_definition_extends_inherited_types() {
    let env = env_from_sig(
        "class Base
           def to_s: () -> String
         end
         class Child < Base
           def to_s: (Integer base) -> String
                   | ...
         end",
    );
    let child = definition(&env, "Child", DefinitionKind::Instance);
    assert_eq!(
        method_types(&child, "to_s"),
        vec!["(Integer base) -> String", "() -> String"]
    );
    let to_s = child.method("to_s").unwrap();
    assert_eq!(to_s.defined_in, Some(parse_type_name("Base").unwrap()));
    assert_eq!(to_s.implemented_in, parse_type_name("Child").unwrap());
}

#[test]
fn test_core_integer_overloads() {
    let integer = definition(&CORE, "Integer", DefinitionKind::Instance);
    assert_eq!(
        method_types(&integer, "+"),
        vec![
            "(Integer other) -> Integer",
            "(Float other) -> Float",
            "(Numeric other) -> Numeric",
        ]
    );
}

#[test]
fn test_alias_copies_the_original() {
    let env = env_from_sig(
        "class Foo
           def size: () -> Integer
           private
           alias length size
         end",
    );
    let foo = definition(&env, "Foo", DefinitionKind::Instance);
    let length = foo.method("length").unwrap();
    assert_eq!(method_types(&foo, "length"), vec!["() -> Integer"]);
    assert_eq!(length.accessibility, Accessibility::Private);
    assert_eq!(length.defined_in, Some(parse_type_name("Foo").unwrap()));
}

#[test]
fn test_alias_of_missing_method() {
    let env = env_from_sig("class Foo\n  alias length size\nend");
    let err = DefinitionBuilder::new(&env)
        .build_instance(&parse_type_name("Foo").unwrap())
        .unwrap_err();
    assert!(matches!(err, BuildError::UnknownMethodAlias { ref old_name, .. } if old_name == "size"));
}

// ============================================================================
// Accessibility
// ============================================================================

#[test]
fn test_sections_and_inline_visibility() {
    let methods = accessibilities(
        "class Foo
           def a: () -> void
           private
           def b: () -> void
           public
           def c: () -> void
           private def d: () -> void
         end",
        "Foo",
        DefinitionKind::Instance,
    );
    assert_eq!(
        methods,
        vec![
            ("a".to_string(), Accessibility::Public),
            ("b".to_string(), Accessibility::Private),
            ("c".to_string(), Accessibility::Public),
            ("d".to_string(), Accessibility::Private),
        ]
    );
}

#[test]
fn test_initialize_and_module_functions() {
    let source = "module Util
                    def self?.helper: () -> void
                    def initialize: () -> void
                  end";
    assert_eq!(
        accessibilities(source, "Util", DefinitionKind::Instance),
        vec![
            ("helper".to_string(), Accessibility::Private),
            ("initialize".to_string(), Accessibility::Private),
        ]
    );
    assert_eq!(
        accessibilities(source, "Util", DefinitionKind::Singleton),
        vec![("helper".to_string(), Accessibility::Public)]
    );
}

#[test]
fn test_attributes() {
    let source = "class Person
                    attr_reader name: String
                    attr_accessor age: Integer
                    private
                    attr_writer secret: String
                  end";
    assert_eq!(
        accessibilities(source, "Person", DefinitionKind::Instance),
        vec![
            ("age".to_string(), Accessibility::Public),
            ("age=".to_string(), Accessibility::Public),
            ("name".to_string(), Accessibility::Public),
            ("secret=".to_string(), Accessibility::Private),
        ]
    );
    let env = env_from_sig(source);
    let person = definition(&env, "Person", DefinitionKind::Instance);
    assert_eq!(method_types(&person, "age="), vec!["(Integer age) -> Integer"]);
    assert_eq!(method_types(&person, "name"), vec!["() -> String"]);
}

// ============================================================================
// Interfaces, generics and extensions
// ============================================================================

#[test]
fn test_interface_methods_are_applied_with_arguments() {
    let env = env_from_sig(
        "interface _Each[A]
           def each: () { (A) -> void } -> void
         end
         class Bag
           include _Each[Integer]
         end",
    );
    let bag = definition(&env, "Bag", DefinitionKind::Instance);
    let each = bag.method("each").unwrap();
    assert_eq!(method_types(&bag, "each"), vec!["() { (Integer) -> void } -> void"]);
    assert_eq!(each.defined_in, Some(parse_type_name("_Each").unwrap()));
    assert_eq!(each.implemented_in, parse_type_name("Bag").unwrap());
}

#[test]
fn test_interface_does_not_override_own_methods() {
    let env = env_from_sig(
        "interface _Sized
           def size: () -> Integer
         end
         class Foo
           def size: () -> String
           include _Sized
         end",
    );
    let foo = definition(&env, "Foo", DefinitionKind::Instance);
    assert_eq!(method_types(&foo, "size"), vec!["() -> String"]);
}

#[test]
fn test_inherited_generic_methods_are_substituted() {
    let env = env_from_sig(
        "class Box[T]
           def get: () -> T
         end
         class IntBox < Box[Integer] end",
    );
    let int_box = definition(&env, "IntBox", DefinitionKind::Instance);
    let get = int_box.method("get").unwrap();
    assert_eq!(method_types(&int_box, "get"), vec!["() -> Integer"]);
    assert_eq!(get.implemented_in, parse_type_name("Box").unwrap());
}

#[test]
fn test_extension_overrides_class_methods() {
    let env = env_from_sig(
        "class Foo
           def a: () -> Integer
         end
         extension Foo (Ext)
           def a: () -> String
           def b: () -> void
         end",
    );
    let foo = definition(&env, "Foo", DefinitionKind::Instance);
    assert_eq!(method_types(&foo, "a"), vec!["() -> String"]);
    assert!(foo.method("b").is_some());
}

// ============================================================================
// Synthesized `new`
// ============================================================================

#[test]
fn test_new_is_derived_from_initialize() {
    let env = env_from_sig(
        "class Point
           def initialize: (Integer x, Integer y) -> void
         end",
    );
    let point = definition(&env, "Point", DefinitionKind::Singleton);
    let new = point.method("new").unwrap();
    assert_eq!(method_types(&point, "new"), vec!["(Integer x, Integer y) -> instance"]);
    assert_eq!(new.defined_in, None);
    assert_eq!(new.implemented_in, parse_type_name("Point").unwrap());
    assert_eq!(new.accessibility, Accessibility::Public);
}

#[test]
fn test_declared_new_wins() {
    let env = env_from_sig(
        "class Point
           def initialize: (Integer x) -> void
           def self.new: () -> Point
         end",
    );
    let point = definition(&env, "Point", DefinitionKind::Singleton);
    assert_eq!(method_types(&point, "new"), vec!["() -> Point"]);
    assert!(point.method("new").unwrap().defined_in.is_some());
}

#[test]
fn test_no_new_without_initialize() {
    let env = env_from_sig("class Point end");
    let point = definition(&env, "Point", DefinitionKind::Singleton);
    assert!(point.method("new").is_none());
}

#[test]
fn test_core_class_gets_new_from_basic_object() {
    let env = env_with_core("class Foo end");
    let foo = definition(&env, "Foo", DefinitionKind::Singleton);
    assert_eq!(method_types(&foo, "new"), vec!["() -> instance"]);
}

// ============================================================================
// Inheritance filter
// ============================================================================

#[test]
fn test_no_inherit_is_a_subset_on_both_sides() {
    let env = env_with_core(
        "class Foo
           def bar: () -> void
           def self.baz: () -> void
         end",
    );
    for kind in [DefinitionKind::Instance, DefinitionKind::Singleton] {
        let foo = definition(&env, "Foo", kind);
        let own = foo.sorted_methods(false);
        let all = foo.sorted_methods(true);
        assert!(own.len() < all.len());
        for method in &own {
            assert_eq!(method.implemented_in, foo.declaration);
            assert!(all.iter().any(|m| m.name == method.name));
        }
    }
}

#[test]
fn test_methods_are_sorted() {
    let string = definition(&CORE, "String", DefinitionKind::Instance);
    let names: Vec<_> = string.sorted_methods(true).iter().map(|m| m.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_interface_definition_flattens_includes() {
    let env = env_from_sig(
        "interface _A
           def a: () -> void
         end
         interface _B[T]
           include _A
           def b: () -> T
           alias bb b
         end",
    );
    let b = DefinitionBuilder::new(&env)
        .build_interface(&parse_type_name("_B").unwrap())
        .unwrap();
    let names: Vec<_> = b.sorted_methods(true).iter().map(|m| m.name.to_string()).collect();
    assert_eq!(names, vec!["a", "b", "bb"]);
    assert_eq!(b.ancestors[0].to_string(), "_B[T]");
    assert_eq!(method_types(&b, "bb"), vec!["() -> T"]);
    assert_eq!(b.method("a").unwrap().defined_in, Some(parse_type_name("_A").unwrap()));
}
