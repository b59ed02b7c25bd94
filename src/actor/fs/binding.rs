//! Watch bindings: glob patterns bound to an action.
//!
//! Patterns match paths relative to the scope root, with `/` separators and
//! `*` never crossing a directory boundary:
//!
//! ```text
//! **/*.html      index.html, pages/index.html
//! **/img/**/*    img/a.png, pages/img/icons/b.svg
//! ```

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern, PatternError};

use super::types::WatchAction;
use crate::utils::path::posix;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
pub struct WatchBinding {
    patterns: Vec<Pattern>,
    pub action: WatchAction,
}

impl WatchBinding {
    pub fn new(patterns: &[&str], action: WatchAction) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<_, _>>()?;
        Ok(Self { patterns, action })
    }

    pub fn matches(&self, rel: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(rel, MATCH_OPTIONS))
    }
}

/// A watched root, the subtrees it ignores, and its bindings.
#[derive(Debug, Clone)]
pub struct WatchScope {
    pub root: PathBuf,
    ignore: Vec<PathBuf>,
    bindings: Vec<WatchBinding>,
}

impl WatchScope {
    pub fn new(root: PathBuf, bindings: Vec<WatchBinding>) -> Self {
        Self {
            root,
            ignore: Vec::new(),
            bindings,
        }
    }

    /// Ignore everything under `dir`.
    pub fn ignoring(mut self, dir: PathBuf) -> Self {
        self.ignore.push(dir);
        self
    }

    /// Actions bound to `path`, in binding order.
    pub fn actions_for(&self, path: &Path) -> Vec<WatchAction> {
        let Ok(rel) = path.strip_prefix(&self.root) else {
            return Vec::new();
        };
        if self.ignore.iter().any(|dir| path.starts_with(dir)) {
            return Vec::new();
        }

        let rel = posix::to_posix(rel);
        self.bindings
            .iter()
            .filter(|binding| binding.matches(&rel))
            .map(|binding| binding.action)
            .collect()
    }
}
