//! Bundled signatures and the full member syntax parse without errors.

use sigq::parser::parse_signature;
use sigq::project::stdlib;
use sigq::syntax::{Declaration, Member, MethodKind};

#[test]
fn test_bundled_signatures_parse() {
    let libraries = stdlib::library_names()
        .map(|name| stdlib::library(name).expect("listed library"));
    for files in std::iter::once(stdlib::CORE).chain(libraries) {
        for (file, text) in files {
            let parse = parse_signature(text);
            assert!(parse.ok(), "{file}: {:?}", parse.errors);
        }
    }
}

const FULL_CLASS: &str = r#"
# A class using every member form.
%a{annotated}
class Foo[T] < Bar[T]
  include Comparable
  include _Each[T]
  extend Loader
  @count: Integer
  attr_reader size: Integer
  def initialize: (Integer size) -> void
  def bar: (Integer) -> String | (String) -> Integer
  def to_s: () -> String | ...
  def self.build: () -> instance
  def self?.helper: () -> void
  alias baz bar
  private
  def secret: () -> void
  class Nested end
end
module M[unchecked out E] end
interface _Each[T] def each: () { (T) -> void } -> void end
extension Kernel (Pathname) end
type json = String | Integer
VERSION: String
$stdout: IO
"#;

#[test]
fn test_every_declaration_form() {
    let parse = parse_signature(FULL_CLASS);
    assert!(parse.ok(), "{:?}", parse.errors);
    let tags: Vec<_> = parse
        .declarations
        .iter()
        .map(|decl| match decl {
            Declaration::Class(_) => "class",
            Declaration::Module(_) => "module",
            Declaration::Interface(_) => "interface",
            Declaration::Extension(_) => "extension",
            Declaration::Alias(_) => "alias",
            Declaration::Constant(_) => "constant",
            Declaration::Global(_) => "global",
        })
        .collect();
    assert_eq!(
        tags,
        vec!["class", "module", "interface", "extension", "alias", "constant", "global"]
    );

    let Declaration::Class(foo) = &parse.declarations[0] else {
        panic!("expected a class");
    };
    let kinds: Vec<_> = foo
        .members
        .iter()
        .filter_map(|member| match member {
            Member::MethodDefinition(def) => Some((def.name.to_string(), def.kind, def.types.len())),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("initialize".to_string(), MethodKind::Instance, 1),
            ("bar".to_string(), MethodKind::Instance, 2),
            ("to_s".to_string(), MethodKind::Instance, 1),
            ("build".to_string(), MethodKind::Singleton, 1),
            ("helper".to_string(), MethodKind::SingletonInstance, 1),
            ("secret".to_string(), MethodKind::Instance, 1),
        ]
    );
}

#[test]
fn test_errors_recover_at_next_declaration() {
    let parse = parse_signature("class Foo\n  def : () -> void\nend\nclass Bar end\nmodule Baz end");
    assert!(!parse.ok());
    assert!(parse.declarations.iter().any(|d| matches!(d, Declaration::Module(_))));
}
