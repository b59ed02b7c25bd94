//! Image copy task.

use anyhow::Result;
use rayon::prelude::*;

use super::context::BuildContext;
use crate::asset::{AssetKind, scan_assets};
use crate::utils::write::copy_atomic;

/// Copy every image under the source root to its mirrored destination.
pub fn copy_images(ctx: &BuildContext) -> Result<usize> {
    let settings = &ctx.settings;
    let images = scan_assets(&settings.source_root, &settings.conventions, AssetKind::Image)?;

    images.par_iter().try_for_each(|image| {
        let Some(origin) = image.origin() else {
            return Ok(());
        };
        copy_atomic(origin, &settings.dest_path(&image.source_path))
    })?;

    Ok(images.len())
}
