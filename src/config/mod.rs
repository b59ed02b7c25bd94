//! Pipeline configuration management for `inlay.toml`.
//!
//! The file is optional: without one, every section uses its defaults and the
//! working directory is the project root.
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[paths]`   | Source root and temporary build directory         |
//! | `[assets]`  | Names of styles, shared partials and image dirs   |
//! | `[cdn]`     | CDN base for production image URLs                |
//! | `[serve]`   | Development server (interface, ports, watch)      |

mod error;
mod section;
mod util;

pub use error::ConfigError;
pub use section::{AssetsConfig, CdnConfig, PathsConfig, ServeConfig};

use crate::{cli::Cli, core::BuildMode, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::{find_config_file, resolve_root_path};

/// Root configuration structure representing inlay.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub cdn: CdnConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl PipelineConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when there is no file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(path);
                config
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.normalize_paths();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Make configured paths absolute (relative to the project root).
    fn normalize_paths(&mut self) {
        self.paths.source = resolve_root_path(&self.root, &self.paths.source);
        self.paths.temp = resolve_root_path(&self.root, &self.paths.temp);
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path and re-resolve configured paths against it.
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
        self.normalize_paths();
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Validate settings that a build in `mode` depends on.
    pub fn validate(&self, mode: BuildMode) -> Result<(), ConfigError> {
        if !self.paths.source.is_dir() {
            return Err(ConfigError::validation(
                "paths.source",
                format!(
                    "source directory `{}` does not exist",
                    self.root_relative(&self.paths.source).display()
                ),
            )
            .with_hint("create it or point [paths] source at your pages"));
        }

        if mode.rewrite_image_urls() && self.cdn.base.trim().is_empty() {
            return Err(ConfigError::validation(
                "cdn.base",
                "production builds rewrite image paths but no CDN base is set",
            )
            .with_hint("set [cdn] base in inlay.toml, or use INLAY_ENV=development"));
        }

        for (field, name) in [
            ("assets.styles_dir", &self.assets.styles_dir),
            ("assets.shared_styles", &self.assets.shared_styles),
            ("assets.image_dir", &self.assets.image_dir),
        ] {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(ConfigError::validation(
                    field,
                    format!("`{name}` must be a single directory name"),
                ));
            }
        }

        Ok(())
    }
}

/// Parse a config from TOML and resolve it against `root` (tests only).
#[cfg(test)]
pub fn test_parse_config(content: &str, root: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::from_str(content).expect("valid test config");
    config.set_root(root);
    config
}
