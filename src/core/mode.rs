//! Build mode resolution for production/development builds.

/// Environment variable selecting the build mode.
pub const MODE_ENV: &str = "INLAY_ENV";

/// Value of [`MODE_ENV`] that selects production. Also the default.
const PRODUCTION_VALUE: &str = "production";

/// Build mode, resolved once per process invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Output lands in the project root, images point at the CDN.
    Production,
    /// Output lands in the temporary build directory, markup stays local.
    Development,
}

impl BuildMode {
    /// Resolve the mode from the process environment.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(MODE_ENV).ok().as_deref())
    }

    /// Resolve the mode from a raw configuration value.
    ///
    /// Absence means production; any value other than `production` means
    /// development.
    pub fn from_value(value: Option<&str>) -> Self {
        match value.unwrap_or(PRODUCTION_VALUE) {
            PRODUCTION_VALUE => Self::Production,
            _ => Self::Development,
        }
    }

    #[inline]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether relative image paths are rewritten to CDN URLs.
    #[inline]
    pub const fn rewrite_image_urls(self) -> bool {
        self.is_production()
    }

    /// Whether the inliner strips selectors made redundant by inlining.
    #[inline]
    pub const fn strip_selectors(self) -> bool {
        self.is_production()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
