//! Immutable build settings, resolved once per process.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::transform::{CdnTransform, RewriteRule};
use crate::config::{AssetsConfig, PipelineConfig};
use crate::core::BuildMode;

/// Everything a task needs to know about where inputs live and outputs go.
///
/// Created by [`BuildSettings::resolve`] and shared read-only by every task.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub mode: BuildMode,
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    /// Project root in production, the temporary build directory otherwise.
    pub dest_root: PathBuf,
    pub temp_dir: PathBuf,
    pub conventions: AssetsConfig,
    pub cdn_base: String,
}

impl BuildSettings {
    pub fn resolve(config: &PipelineConfig, mode: BuildMode) -> Self {
        let dest_root = if mode.is_production() {
            config.root.clone()
        } else {
            config.paths.temp.clone()
        };

        Self {
            mode,
            project_root: config.root.clone(),
            source_root: config.paths.source.clone(),
            dest_root,
            temp_dir: config.paths.temp.clone(),
            conventions: config.assets.clone(),
            cdn_base: config.cdn.base.clone(),
        }
    }

    /// Destination path mirroring a source-relative path.
    pub fn dest_path(&self, source_path: &str) -> PathBuf {
        self.dest_root.join(source_path)
    }

    /// Shared partials directory (`<source>/<shared_styles>`).
    pub fn shared_styles_dir(&self) -> PathBuf {
        self.source_root.join(&self.conventions.shared_styles)
    }

    /// Whether the destination is the project root itself.
    pub fn writes_in_place(&self) -> bool {
        self.dest_root == self.project_root
    }

    /// Whether `path` lies inside the source tree.
    pub fn is_source_path(&self, path: &Path) -> bool {
        path.starts_with(&self.source_root)
    }

    /// Image rewrite for this mode: active in production, inert otherwise.
    pub fn cdn_transform(&self) -> Result<CdnTransform> {
        if !self.mode.rewrite_image_urls() {
            return Ok(CdnTransform::inactive());
        }
        let rule = RewriteRule::new(self.cdn_base.as_str(), &self.conventions.image_dir)
            .context("invalid image directory pattern")?;
        Ok(CdnTransform::active(rule))
    }
}

/// Settings rooted at `root` with default conventions (tests only).
#[cfg(test)]
pub fn test_settings(root: &Path, mode: BuildMode) -> BuildSettings {
    let mut config = PipelineConfig::default();
    config.cdn.base = "https://cdn.example/assets/".into();
    config.set_root(root);
    BuildSettings::resolve(&config, mode)
}
