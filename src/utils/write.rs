//! Atomic file writes.
//!
//! The dev server reads the destination tree while rebuilds write to it, so
//! every output file is written to a sibling temp file and renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write `contents` to `path` atomically, creating parent directories.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    let parent = ensure_parent(path)?;
    let temp = temp_sibling(path, parent);

    fs::write(&temp, contents).with_context(|| format!("failed to write {}", temp.display()))?;
    fs::rename(&temp, path).with_context(|| {
        let _ = fs::remove_file(&temp);
        format!("failed to move output into place: {}", path.display())
    })
}

/// Copy `from` to `to` atomically, creating parent directories.
pub fn copy_atomic(from: &Path, to: &Path) -> Result<()> {
    let parent = ensure_parent(to)?;
    let temp = temp_sibling(to, parent);

    fs::copy(from, &temp).with_context(|| format!("failed to copy {}", from.display()))?;
    fs::rename(&temp, to).with_context(|| {
        let _ = fs::remove_file(&temp);
        format!("failed to move output into place: {}", to.display())
    })
}

fn ensure_parent(path: &Path) -> Result<&Path> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory {}", parent.display()))?;
    Ok(parent)
}

/// Dotfile sibling so the watcher's temp-file filter ignores it.
fn temp_sibling(path: &Path, parent: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parent.join(format!(".{name}.{}.tmp", std::process::id()))
}
