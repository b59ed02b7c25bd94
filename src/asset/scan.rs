//! Asset scanning (pure, reads the filesystem only).

use std::path::Path;

use anyhow::{Context, Result};
use jwalk::{Parallelism, WalkDir};

use super::{Asset, AssetKind};
use crate::config::AssetsConfig;
use crate::utils::path::posix;

/// Collect every asset of `kind` under `source_root`.
///
/// Assets come back sorted by source path with their content still on disk.
/// Hidden files and directories are skipped.
pub fn scan_assets(
    source_root: &Path,
    conventions: &AssetsConfig,
    kind: AssetKind,
) -> Result<Vec<Asset>> {
    let mut assets = Vec::new();

    // Serial: scans run inside pipeline tasks that already occupy the rayon pool.
    let walk = WalkDir::new(source_root)
        .sort(true)
        .skip_hidden(true)
        .parallelism(Parallelism::Serial);
    for entry in walk {
        let entry =
            entry.with_context(|| format!("failed to scan {}", source_root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Ok(rel) = path.strip_prefix(source_root) else {
            continue;
        };

        if AssetKind::classify(rel, conventions) == Some(kind) {
            assets.push(Asset::on_disk(posix::to_posix(rel), kind, path.clone()));
        }
    }

    crate::debug!("scan"; "{} {} under {}", assets.len(), kind.label(), source_root.display());
    Ok(assets)
}
