//! Configuration sections of `inlay.toml`.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "src"          # Source root (html, styles, images)
//! temp = "tmp"            # Development output, removed by `inlay clean`
//!
//! [assets]
//! styles_dir = "styles"   # Per-page stylesheet directories
//! shared_styles = "sass"  # Shared partials, never compiled directly
//! image_dir = "img"       # Per-page image directories
//!
//! [cdn]
//! base = "https://cdn.example/assets/"
//!
//! [serve]
//! interface = "127.0.0.1"
//! port = 3000
//! ws_port = 35729
//! watch = true
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `[paths]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Source root, relative to the project root.
    pub source: PathBuf,
    /// Temporary build directory used as the development destination.
    pub temp: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("src"),
            temp: PathBuf::from("tmp"),
        }
    }
}

/// `[assets]` section: directory naming conventions inside the source tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub styles_dir: String,
    /// Shared partials directory directly under the source root.
    pub shared_styles: String,
    pub image_dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            styles_dir: "styles".into(),
            shared_styles: "sass".into(),
            image_dir: "img".into(),
        }
    }
}

/// `[cdn]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Prefix concatenated verbatim in front of rewritten image paths.
    pub base: String,
}

/// `[serve]` section: development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// WebSocket port for the reload channel.
    pub ws_port: u16,

    /// Enable file watcher for live reload.
    pub watch: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3000,
            ws_port: crate::cli::serve::DEFAULT_WS_PORT,
            watch: true,
        }
    }
}
