//! Ancestor chain linearization.

use rstest::rstest;
use sigq::hir::{Ancestor, BuildError, DefinitionBuilder};
use sigq::{DefinitionKind, parse_type_name};

use crate::helpers::env_helpers::{CORE, ancestor_strings, env_from_sig, env_with_core};

fn build(source: &str, name: &str) -> Result<Vec<Ancestor>, BuildError> {
    let env = env_from_sig(source);
    let decl = env
        .find_declaration(&parse_type_name(name).unwrap())
        .expect("declared");
    DefinitionBuilder::new(&env).build_ancestors(&Ancestor::instance_root(decl))
}

// ============================================================================
// Instance chains
// ============================================================================

#[test]
fn test_plain_class_starts_with_itself() {
    let chain = build("class Foo end", "Foo").unwrap();
    assert_eq!(
        chain[0],
        Ancestor::Instance {
            name: parse_type_name("Foo").unwrap(),
            args: vec![],
        }
    );
    assert_eq!(chain.len(), 1);
}

#[rstest]
#[case("class G end", 0, "G")]
#[case("class G[A] end", 1, "G[A]")]
#[case("class G[A, B, C] end", 3, "G[A, B, C]")]
#[case("module G[in A, out B] end", 2, "G[A, B]")]
fn test_root_has_one_arg_per_type_param(
    #[case] source: &str,
    #[case] arity: usize,
    #[case] rendered: &str,
) {
    let chain = build(source, "G").unwrap();
    assert_eq!(chain[0].args().len(), arity);
    assert_eq!(chain[0].to_string(), rendered);
}

#[test]
fn test_core_object_chain() {
    let env = env_with_core("class Foo end");
    assert_eq!(
        ancestor_strings(&env, "Foo", DefinitionKind::Instance),
        vec!["Foo", "Object", "Kernel", "BasicObject"]
    );
}

#[test]
fn test_later_includes_come_first() {
    let env = env_from_sig(
        "module M1 end
         module M2 end
         class Foo
           include M1
           include M2
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "Foo", DefinitionKind::Instance),
        vec!["Foo", "M2", "M1"]
    );
}

#[test]
fn test_module_already_in_chain_is_skipped() {
    let env = env_from_sig(
        "module M end
         class A
           include M
         end
         class B < A
           include M
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "B", DefinitionKind::Instance),
        vec!["B", "A", "M"]
    );
}

#[test]
fn test_type_arguments_flow_into_super_class() {
    let env = env_from_sig(
        "class Base[T] end
         module Box[T] end
         class Sub[U] < Base[Array[U]]
           include Box[Integer]
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "Sub", DefinitionKind::Instance),
        vec!["Sub[U]", "Box[Integer]", "Base[Array[U]]"]
    );
}

#[test]
fn test_nested_names_resolve_lexically() {
    let env = env_from_sig(
        "module Outer
           module Helper end
           class Inner
             include Helper
           end
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "Outer::Inner", DefinitionKind::Instance),
        vec!["Outer::Inner", "Outer::Helper"]
    );
}

#[test]
fn test_interface_includes_stay_out_of_chain() {
    let env = env_from_sig(
        "interface _Sized
           def size: () -> Integer
         end
         class Bag
           include _Sized
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "Bag", DefinitionKind::Instance),
        vec!["Bag"]
    );
}

#[test]
fn test_extensions_follow_the_type_sorted_by_name() {
    let env = env_from_sig(
        "class Foo end
         module Mixin end
         extension Foo (Zeta)
           include Mixin
         end
         extension Foo (Alpha) end",
    );
    assert_eq!(
        ancestor_strings(&env, "Foo", DefinitionKind::Instance),
        vec!["Foo (Zeta)", "Mixin", "Foo (Alpha)", "Foo"]
    );
}

// ============================================================================
// Singleton chains
// ============================================================================

#[test]
fn test_singleton_without_core() {
    let env = env_from_sig(
        "module Ext end
         class Foo
           extend Ext
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "Foo", DefinitionKind::Singleton),
        vec!["singleton(Foo)", "Ext"]
    );
}

#[test]
fn test_class_singleton_reaches_class_and_module() {
    let env = env_with_core("class Foo end");
    assert_eq!(
        ancestor_strings(&env, "Foo", DefinitionKind::Singleton),
        vec![
            "singleton(Foo)",
            "singleton(Object)",
            "singleton(BasicObject)",
            "Class",
            "Module",
            "Object",
            "Kernel",
            "BasicObject",
        ]
    );
}

#[test]
fn test_module_singleton_is_a_module_instance() {
    assert_eq!(
        ancestor_strings(&CORE, "Comparable", DefinitionKind::Singleton),
        vec!["singleton(Comparable)", "Module", "Object", "Kernel", "BasicObject"]
    );
}

#[test]
fn test_singleton_extension() {
    let env = env_from_sig(
        "class Foo end
         extension Foo (Ext)
           def self.build: () -> Foo
         end",
    );
    assert_eq!(
        ancestor_strings(&env, "Foo", DefinitionKind::Singleton),
        vec!["singleton(Foo (Ext))", "singleton(Foo)"]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[rstest]
#[case("module A\n include B\nend\nmodule B\n include A\nend")]
#[case("class A < B end\nclass B < A end")]
fn test_recursive_ancestors(#[case] source: &str) {
    let err = build(source, "A").unwrap_err();
    assert!(matches!(err, BuildError::RecursiveAncestor { .. }), "{err:?}");
}

#[test]
fn test_wrong_arity_in_super_class() {
    let err = build("class Base[T] end\nclass Sub < Base[Integer, String] end", "Sub").unwrap_err();
    assert_eq!(
        err,
        BuildError::InvalidTypeApplication {
            name: parse_type_name("Base").unwrap(),
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_unknown_super_class() {
    let err = build("class Sub < Missing end", "Sub").unwrap_err();
    assert_eq!(err.to_string(), "Cannot find class: Missing");
}
