//! Command tests: query output and dispatch.

pub mod tests_dispatch;
pub mod tests_queries;
