//! Style compilation task.
//!
//! Every compilable `*.scss` source becomes a `*.css` file at the mirrored
//! destination path. A file that fails to compile is logged and skipped; the
//! task itself only fails on I/O errors.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use thiserror::Error;

use super::context::BuildContext;
use super::settings::BuildSettings;
use crate::asset::{Asset, AssetKind, scan_assets};
use crate::log;
use crate::utils::write::write_atomic;

/// Compile error for a single stylesheet.
#[derive(Debug, Error)]
#[error("{}: {message}", path.display())]
pub struct StyleError {
    pub path: PathBuf,
    pub message: String,
}

/// Stylesheet compiler: source path in, CSS text out.
pub trait StyleCompiler: Send + Sync {
    fn compile(&self, path: &Path) -> Result<String, StyleError>;
}

/// SCSS compiler backed by `grass`.
///
/// The source root and the shared partials directory are on the load path,
/// so pages can `@import` shared partials by bare name.
pub struct GrassCompiler {
    load_paths: Vec<PathBuf>,
}

impl GrassCompiler {
    pub fn new(settings: &BuildSettings) -> Self {
        Self {
            load_paths: vec![settings.source_root.clone(), settings.shared_styles_dir()],
        }
    }
}

impl StyleCompiler for GrassCompiler {
    fn compile(&self, path: &Path) -> Result<String, StyleError> {
        let options = self
            .load_paths
            .iter()
            .fold(grass::Options::default(), |options, dir| options.load_path(dir));

        grass::from_path(path, &options).map_err(|err| StyleError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Outcome of a style task run.
#[derive(Debug, Default)]
pub struct StyleReport {
    pub compiled: usize,
    pub failed: Vec<StyleError>,
}

impl StyleReport {
    pub fn attempted(&self) -> usize {
        self.compiled + self.failed.len()
    }
}

enum Outcome {
    Compiled,
    Failed(StyleError),
}

/// Compile every stylesheet under the source root into the destination.
pub fn compile_styles(ctx: &BuildContext) -> Result<StyleReport> {
    let settings = &ctx.settings;
    let sources = scan_assets(
        &settings.source_root,
        &settings.conventions,
        AssetKind::Stylesheet,
    )?;

    let outcomes: Vec<Outcome> = sources
        .par_iter()
        .map(|asset| compile_one(ctx, asset))
        .collect::<Result<_>>()?;

    let mut report = StyleReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Compiled => report.compiled += 1,
            Outcome::Failed(err) => {
                log!("styles"; "{}", err);
                report.failed.push(err);
            }
        }
    }
    Ok(report)
}

fn compile_one(ctx: &BuildContext, asset: &Asset) -> Result<Outcome> {
    let Some(origin) = asset.origin() else {
        return Ok(Outcome::Compiled);
    };

    match ctx.styles.compile(origin) {
        Ok(css) => {
            let dest = ctx
                .settings
                .dest_path(&asset.source_path)
                .with_extension("css");
            write_atomic(&dest, css)?;
            crate::debug!("styles"; "{} -> {}", asset.source_path, dest.display());
            Ok(Outcome::Compiled)
        }
        Err(err) => Ok(Outcome::Failed(err)),
    }
}
