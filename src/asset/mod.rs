//! Source assets flowing through the pipeline tasks.
//!
//! An [`Asset`] is owned by exactly one task at a time. Text kinds are loaded
//! into memory when a task needs their content; images stay on disk.

mod kind;
mod scan;

pub use kind::AssetKind;
pub use scan::scan_assets;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::utils::path::posix;

/// Content of an asset in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Loaded text (html, stylesheets).
    Text(String),
    /// Bytes still on disk at the given absolute path.
    OnDisk(PathBuf),
    /// Deleted or empty source; passes every transform untouched.
    Empty,
}

/// A unit of work for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Source-relative path with `/` separators.
    pub source_path: String,
    pub kind: AssetKind,
    pub content: Content,
}

impl Asset {
    /// Asset with in-memory text content.
    pub fn text(source_path: impl Into<String>, kind: AssetKind, text: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            kind,
            content: Content::Text(text.into()),
        }
    }

    /// Asset whose bytes are still on disk.
    pub fn on_disk(source_path: impl Into<String>, kind: AssetKind, path: PathBuf) -> Self {
        Self {
            source_path: source_path.into(),
            kind,
            content: Content::OnDisk(path),
        }
    }

    /// Directory of the asset relative to the source root (`""` at the top).
    pub fn dir(&self) -> &str {
        posix::dirname(&self.source_path)
    }

    /// Absolute source location, if the content is still on disk.
    pub fn origin(&self) -> Option<&Path> {
        match &self.content {
            Content::OnDisk(path) => Some(path),
            _ => None,
        }
    }

    /// Read on-disk text content into memory. No-op for other content.
    pub fn load_text(mut self) -> Result<Self> {
        if let Content::OnDisk(path) = &self.content
            && self.kind.is_text()
        {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            self.content = if text.is_empty() {
                Content::Empty
            } else {
                Content::Text(text)
            };
        }
        Ok(self)
    }

    /// Text content, if loaded.
    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Consume into text, treating empty content as an empty string.
    pub fn into_text(self) -> Option<String> {
        match self.content {
            Content::Text(text) => Some(text),
            Content::Empty => Some(String::new()),
            Content::OnDisk(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dir() {
        let asset = Asset::text("pages/index.html", AssetKind::Html, "");
        assert_eq!(asset.dir(), "pages");
        let asset = Asset::text("index.html", AssetKind::Html, "");
        assert_eq!(asset.dir(), "");
    }

    #[test]
    fn test_load_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.html");
        fs::write(&path, "<p>hi</p>").unwrap();

        let asset = Asset::on_disk("index.html", AssetKind::Html, path)
            .load_text()
            .unwrap();
        assert_eq!(asset.as_text(), Some("<p>hi</p>"));
    }

    #[test]
    fn test_load_empty_becomes_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blank.html");
        fs::write(&path, "").unwrap();

        let asset = Asset::on_disk("blank.html", AssetKind::Html, path)
            .load_text()
            .unwrap();
        assert_eq!(asset.content, Content::Empty);
        assert_eq!(asset.into_text(), Some(String::new()));
    }

    #[test]
    fn test_images_stay_on_disk() {
        let path = PathBuf::from("/nowhere/img/logo.png");
        let asset = Asset::on_disk("img/logo.png", AssetKind::Image, path.clone())
            .load_text()
            .unwrap();
        assert_eq!(asset.origin(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_text_file_is_error() {
        let asset = Asset::on_disk(
            "gone.html",
            AssetKind::Html,
            PathBuf::from("/nowhere/gone.html"),
        );
        assert!(asset.load_text().is_err());
    }
}
