//! Shared context handed to every task in a graph run.

use std::sync::Arc;

use super::inline::{CssInlineEngine, CssInliner};
use super::settings::BuildSettings;
use super::styles::{GrassCompiler, StyleCompiler};

/// Settings plus the external collaborators tasks call into.
#[derive(Clone)]
pub struct BuildContext {
    pub settings: Arc<BuildSettings>,
    pub styles: Arc<dyn StyleCompiler>,
    pub inliner: Arc<dyn CssInliner>,
}

impl BuildContext {
    /// Context with the default compiler (grass) and inliner (css-inline).
    pub fn new(settings: BuildSettings) -> Self {
        let styles = Arc::new(GrassCompiler::new(&settings));
        Self {
            settings: Arc::new(settings),
            styles,
            inliner: Arc::new(CssInlineEngine),
        }
    }

    #[cfg(test)]
    pub fn with_inliner(mut self, inliner: impl CssInliner + 'static) -> Self {
        self.inliner = Arc::new(inliner);
        self
    }

    #[cfg(test)]
    pub fn with_styles(mut self, styles: impl StyleCompiler + 'static) -> Self {
        self.styles = Arc::new(styles);
        self
    }
}
