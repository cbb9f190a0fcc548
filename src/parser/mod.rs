//! Hand-written parser for signature files
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser (recursive descent) → Declarations + SyntaxErrors
//! ```
//!
//! Parsing never stops at the first error: a failed declaration is recorded
//! and the parser skips ahead to the next declaration keyword.

#[allow(clippy::module_inception)]
mod parser;

mod errors;
mod lexer;
mod parse_type;
mod syntax_kind;

pub use errors::{ErrorCode, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse_signature};
pub use syntax_kind::SyntaxKind;
