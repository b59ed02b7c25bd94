//! HTML finishing task.
//!
//! Per page, in order:
//!
//! ```text
//! copy source -> dest        (baseline)
//! rewrite image urls         (production only)
//! inline css                 (base = dest page directory)
//! write dest                 (atomic)
//! ```
//!
//! Inlining runs against the destination directory, where the style task
//! has already written the compiled stylesheets the page links to.

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::context::BuildContext;
use super::inline::InlineOptions;
use super::transform::{CdnTransform, Transform};
use crate::asset::{Asset, AssetKind, Content, scan_assets};
use crate::utils::write::{copy_atomic, write_atomic};

/// Finish every page under the source root. Returns the page count.
pub fn finish_html(ctx: &BuildContext) -> Result<usize> {
    let settings = &ctx.settings;
    let pages = scan_assets(&settings.source_root, &settings.conventions, AssetKind::Html)?;
    let transform = settings.cdn_transform()?;
    let options = InlineOptions {
        strip_selectors: settings.mode.strip_selectors(),
    };

    if transform.is_active() {
        crate::debug!("html"; "image urls -> {}", settings.cdn_base);
    }

    let count = pages.len();
    pages
        .into_par_iter()
        .try_for_each(|page| finish_page(ctx, &transform, &options, page))?;
    Ok(count)
}

fn finish_page(
    ctx: &BuildContext,
    transform: &CdnTransform,
    options: &InlineOptions,
    page: Asset,
) -> Result<()> {
    let dest = ctx.settings.dest_path(&page.source_path);
    if let Some(origin) = page.origin() {
        copy_atomic(origin, &dest)?;
    }

    let page = transform.apply(page.load_text()?);
    if page.content == Content::Empty {
        return Ok(());
    }

    let source_path = page.source_path.clone();
    let Some(html) = page.into_text() else {
        return Ok(());
    };

    let base_dir = dest.parent().unwrap_or(&ctx.settings.dest_root);
    let inlined = ctx
        .inliner
        .inline(&html, base_dir, options)
        .with_context(|| format!("failed to inline css into {source_path}"))?;

    write_atomic(&dest, inlined)?;
    crate::debug!("html"; "{} -> {}", source_path, dest.display());
    Ok(())
}
