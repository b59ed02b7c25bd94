//! Clean and cleanup tasks.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jwalk::{Parallelism, WalkDir};

use super::settings::BuildSettings;

/// Remove the temporary build directory. Missing directory is not an error.
pub fn clean(settings: &BuildSettings) -> Result<usize> {
    remove_dir(&settings.temp_dir).map(usize::from)
}

/// Remove every destination-side styles directory.
///
/// Directories under the source root are preserved, and so is the temporary
/// build directory when the destination is the project root.
pub fn cleanup(settings: &BuildSettings) -> Result<usize> {
    let dirs = styles_dirs(settings)?;
    let mut removed = 0;
    for dir in &dirs {
        if remove_dir(dir)? {
            removed += 1;
        }
    }
    Ok(removed)
}

fn styles_dirs(settings: &BuildSettings) -> Result<Vec<PathBuf>> {
    let root = &settings.dest_root;
    if !root.exists() {
        return Ok(Vec::new());
    }

    let skip_temp = settings.writes_in_place();
    let mut found: Vec<PathBuf> = Vec::new();
    // Serial: scans run inside pipeline tasks that already occupy the rayon pool.
    let walk = WalkDir::new(root)
        .sort(true)
        .skip_hidden(true)
        .parallelism(Parallelism::Serial);
    for entry in walk {
        let entry = entry.with_context(|| format!("failed to scan {}", root.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().to_str() != Some(settings.conventions.styles_dir.as_str()) {
            continue;
        }

        let path = entry.path();
        if settings.is_source_path(&path)
            || (skip_temp && path.starts_with(&settings.temp_dir))
            || found.iter().any(|dir| path.starts_with(dir))
        {
            continue;
        }
        found.push(path);
    }
    Ok(found)
}

/// Returns whether anything was removed.
fn remove_dir(dir: &Path) -> Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("failed to remove {}", dir.display())),
    }
}
