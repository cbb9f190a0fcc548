use std::io::Write;

use super::CommandError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("sigq {VERSION}")
}

pub fn run(out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "{}", version_line())?;
    Ok(())
}
