//! Signature file discovery and reading.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::env_loader::LoadError;

/// Extension of signature files.
pub const SIGNATURE_EXTENSION: &str = "sig";

/// Returns true if the path has the signature file extension.
pub fn is_signature_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SIGNATURE_EXTENSION)
}

/// Collect signature files under `path`, sorted by path.
///
/// A file path is returned as-is regardless of its extension.
pub fn collect_signature_files(path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| LoadError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf()),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && is_signature_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Read a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
