//! Errors raised while building definitions.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::TypeName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Cannot find class: {}", .0.relative())]
    UnknownType(TypeName),

    #[error("Recursive ancestor detected: {}", .name.relative())]
    RecursiveAncestor { name: TypeName },

    #[error(
        "Invalid type application: {} expects {expected} type argument(s), but given {actual}",
        .name.relative()
    )]
    InvalidTypeApplication {
        name: TypeName,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown method alias: {new_name} refers to missing {old_name} in {}", .type_name.relative())]
    UnknownMethodAlias {
        type_name: TypeName,
        new_name: SmolStr,
        old_name: SmolStr,
    },
}
