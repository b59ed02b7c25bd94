//! Asset kind definitions.

use std::path::Path;

use crate::config::AssetsConfig;

/// Kind of source asset, decided from its source-relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// `*.html` anywhere in the source tree.
    Html,
    /// `*.scss` inside a styles directory, outside the shared partials.
    Stylesheet,
    /// Any file with an extension inside an image directory.
    Image,
}

impl AssetKind {
    /// Whether assets of this kind are processed as text.
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Html | Self::Stylesheet)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Stylesheet => "styles",
            Self::Image => "images",
        }
    }

    /// Classify a source-relative path.
    ///
    /// Mirrors the source layout conventions:
    /// - `**/*.html`
    /// - `**/<styles_dir>/**/*.scss`, minus `<shared_styles>/**` and `_partials`
    /// - `**/<image_dir>/**/*.*`
    pub fn classify(rel: &Path, conventions: &AssetsConfig) -> Option<Self> {
        let name = rel.file_name()?.to_str()?;
        if name.starts_with('.') {
            return None;
        }

        let dirs: Vec<&str> = rel
            .parent()
            .map(|p| p.iter().filter_map(|c| c.to_str()).collect())
            .unwrap_or_default();
        let in_dir = |dir: &str| dirs.iter().any(|d| *d == dir);
        let ext = rel.extension().and_then(|e| e.to_str());

        match ext {
            Some("html") => Some(Self::Html),
            Some("scss")
                if in_dir(&conventions.styles_dir)
                    && dirs.first() != Some(&conventions.shared_styles.as_str())
                    && !name.starts_with('_') =>
            {
                Some(Self::Stylesheet)
            }
            Some(_) if in_dir(&conventions.image_dir) => Some(Self::Image),
            _ => None,
        }
    }
}
