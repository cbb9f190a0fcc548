//! Loader tests: bundled libraries, signature directories and load errors.

pub mod tests_loader;
