//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Asset pipeline for hand-written html pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: inlay.toml)
    #[arg(short = 'C', long, global = true, default_value = "inlay.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands (default: dev)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Remove the temporary build directory
    Clean,

    /// Build everything and remove destination-side stylesheets
    ///
    /// Runs in production mode unless INLAY_ENV=development is set.
    /// Production requires `[cdn] base` in inlay.toml.
    #[command(visible_alias = "b")]
    Build,

    /// Build, serve the output and rebuild on change
    ///
    /// Runs in production mode unless INLAY_ENV=development is set.
    /// Production requires `[cdn] base` in inlay.toml.
    #[command(visible_alias = "d")]
    Dev {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable file watching for auto-rebuild
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },
}

impl Cli {
    /// The subcommand to run, `dev` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dev {
            interface: None,
            port: None,
            watch: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_dev() {
        let cli = Cli::parse_from(["inlay"]);
        assert!(matches!(cli.command(), Commands::Dev { watch: None, .. }));
        assert_eq!(cli.config, PathBuf::from("inlay.toml"));
    }

    #[test]
    fn test_subcommands() {
        assert_eq!(Cli::parse_from(["inlay", "clean"]).command(), Commands::Clean);
        assert_eq!(Cli::parse_from(["inlay", "build"]).command(), Commands::Build);

        let cli = Cli::parse_from(["inlay", "dev", "-p", "4000", "--watch", "false"]);
        assert_eq!(
            cli.command(),
            Commands::Dev {
                interface: None,
                port: Some(4000),
                watch: Some(false)
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["inlay", "build", "-V", "-C", "mail.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("mail.toml"));
    }

    #[test]
    fn test_help_mentions_cdn_base() {
        let cmd = <Cli as clap::CommandFactory>::command();
        for name in ["build", "dev"] {
            let sub = cmd.find_subcommand(name).unwrap();
            let help = sub.get_long_about().unwrap().to_string();
            assert!(help.contains("[cdn] base"), "{name}: {help}");
            assert!(help.contains("INLAY_ENV=development"), "{name}: {help}");
        }
    }
}
