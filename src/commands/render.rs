//! Pure formatting of query results into output lines.

use crate::base::TypeName;
use crate::cli::Command;
use crate::hir::{Ancestor, Definition, DefinitionKind, MethodRecord};
use crate::project::DeclarationKind;

pub fn help_lines() -> Vec<String> {
    std::iter::once("Available commands:".to_string())
        .chain(Command::NAMES.iter().map(|name| format!("  {name}")))
        .collect()
}

/// `name (kind)`
pub fn list_line(name: &TypeName, kind: DeclarationKind) -> String {
    format!("{} ({kind})", name.relative())
}

pub fn ancestor_lines(ancestors: &[Ancestor]) -> Vec<String> {
    ancestors.iter().map(ToString::to_string).collect()
}

/// `name (accessibility)` for each method.
pub fn method_list_lines(methods: &[&MethodRecord]) -> Vec<String> {
    methods
        .iter()
        .map(|method| format!("{} ({})", method.name, method.accessibility))
        .collect()
}

/// The detail block of `method`:
///
/// ```text
/// Foo#bar
///   defined_in: Foo
///   implementation: Foo
///   accessibility: public
///   types:
///       (Integer) -> String
///     | (String) -> Integer
/// ```
pub fn method_detail_lines(definition: &Definition, method: &MethodRecord) -> Vec<String> {
    let separator = match definition.kind {
        DefinitionKind::Instance => "#",
        DefinitionKind::Singleton => ".",
    };
    let defined_in = method
        .defined_in
        .as_ref()
        .map(|name| name.relative().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        format!("{}{separator}{}", definition.declaration.relative(), method.name),
        format!("  defined_in: {defined_in}"),
        format!("  implementation: {}", method.implemented_in.relative()),
        format!("  accessibility: {}", method.accessibility),
        "  types:".to_string(),
    ];
    for (i, method_type) in method.method_types.iter().enumerate() {
        let prefix = if i == 0 { ' ' } else { '|' };
        lines.push(format!("    {prefix} {method_type}"));
    }
    lines
}
