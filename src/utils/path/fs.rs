//! Absolute path resolution.
//!
//! notify reports canonical paths, so watch roots and the paths compared
//! against them go through [`normalize_path`] first.

use std::path::{Path, PathBuf};

/// Canonical form of `path`, or its absolute form when it does not exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
