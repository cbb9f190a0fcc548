//! Parser error handling module

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::SyntaxError;
