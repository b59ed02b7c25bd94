//! Build and clean commands.
//!
//! - `inlay clean` - remove the temporary build directory
//! - `inlay build` - package: full build, then cleanup of compiled stylesheets
//! - `inlay dev`   - full build before serving (see `serve`)

use std::time::Instant;

use anyhow::Result;

use crate::{
    log,
    pipeline::{self, BuildContext, BuildSettings, Pipeline},
};

/// Remove the temporary build directory.
pub fn clean(settings: &BuildSettings) -> Result<()> {
    let display = settings
        .temp_dir
        .strip_prefix(&settings.project_root)
        .unwrap_or(&settings.temp_dir)
        .display()
        .to_string();

    if pipeline::clean(settings)? > 0 {
        log!("clean"; "removed {}", display);
    } else {
        log!("clean"; "nothing to remove at {}", display);
    }
    Ok(())
}

/// Run a pipeline to completion, logging the total time.
pub fn run_pipeline(ctx: &BuildContext, pipeline: Pipeline) -> Result<()> {
    let start = Instant::now();
    log!("build"; "{} ({}) -> {}", pipeline, ctx.settings.mode, ctx.settings.dest_root.display());

    pipeline.run(ctx)?;

    log!("build"; "{} finished in {}ms", pipeline, start.elapsed().as_millis());
    Ok(())
}
