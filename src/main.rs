//! Inlay - an asset pipeline for hand-written HTML pages.
//!
//! Compiles per-page SCSS, inlines the resulting CSS into the pages, points
//! image references at a CDN in production and serves the output with live
//! reload during development.

mod actor;
mod asset;
mod cli;
mod config;
mod core;
mod embed;
mod logger;
mod pipeline;
mod reload;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PipelineConfig;
use core::BuildMode;
use pipeline::{BuildContext, BuildSettings, Pipeline};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let mut config = PipelineConfig::load(&cli)?;
    let root = config
        .get_root()
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", config.get_root().display()))?;
    config.set_root(&root);

    let mode = BuildMode::from_env();
    debug!("config"; "{} build in {}", mode, root.display());

    match cli.command() {
        Commands::Clean => cli::build::clean(&BuildSettings::resolve(&config, mode)),
        Commands::Build => {
            config.validate(mode)?;
            let ctx = BuildContext::new(BuildSettings::resolve(&config, mode));
            cli::build::run_pipeline(&ctx, Pipeline::Package)
        }
        Commands::Dev {
            interface,
            port,
            watch,
        } => {
            if let Some(interface) = interface {
                config.serve.interface = interface;
            }
            if let Some(port) = port {
                config.serve.port = port;
            }
            if let Some(watch) = watch {
                config.serve.watch = watch;
            }
            serve(&config, mode)
        }
    }
}

/// Full build, then serve the destination root until Ctrl+C.
fn serve(config: &PipelineConfig, mode: BuildMode) -> Result<()> {
    config.validate(mode)?;
    let ctx = BuildContext::new(BuildSettings::resolve(config, mode));

    // A broken page must not keep the server from starting; the watcher
    // retries on the next change
    if let Err(e) = cli::build::run_pipeline(&ctx, Pipeline::Build) {
        log!("error"; "initial build failed: {:#}", e);
    }

    std::fs::create_dir_all(&ctx.settings.dest_root).with_context(|| {
        format!("failed to create {}", ctx.settings.dest_root.display())
    })?;

    let bound = cli::serve::bind_server(&ctx.settings.dest_root, &config.serve)?;
    debug!("serve"; "serving {} on {}", ctx.settings.dest_root.display(), bound.addr());
    bound.run(ctx)
}
