//! CDN image rewrite (Asset -> Asset).
//!
//! Rewrites relative image references in HTML markup to absolute CDN URLs:
//!
//! ```text
//! pages/index.html:  <img src="img/logo.png" alt="">
//!                 -> <img src="https://cdn.example/assets/pages/img/logo.png" alt="">
//! ```
//!
//! An attribute matches when it is preceded by whitespace, is spelled `src`
//! in any case, and its value starts with `<image_dir>/`. The value must be
//! followed by whitespace or the end of the tag (`>` or `/`). Everything
//! around the path is reproduced exactly as matched.

use std::borrow::Cow;

use regex::{Captures, Regex};

use super::Transform;
use crate::asset::{Asset, AssetKind, Content};
use crate::utils::path::posix;

/// Maps (asset directory, matched image path) to a CDN URL.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    cdn_base: String,
    pattern: Regex,
}

impl RewriteRule {
    pub fn new(cdn_base: impl Into<String>, image_dir: &str) -> Result<Self, regex::Error> {
        const WS: &str = r"[ \t\r\n\x0B\x0C]";
        let pattern = format!(
            r#"({WS})([sS][rR][cC])="({}/[^"\r\n]+)"({WS}|[/>])"#,
            regex::escape(image_dir)
        );
        Ok(Self {
            cdn_base: cdn_base.into(),
            pattern: Regex::new(&pattern)?,
        })
    }

    /// CDN URL for `matched`, resolved against the asset's own directory.
    pub fn url(&self, asset_dir: &str, matched: &str) -> String {
        format!("{}{}", self.cdn_base, posix::join(asset_dir, matched))
    }

    /// Rewrite every matching attribute in `html`.
    ///
    /// Borrows the input when nothing matched.
    pub fn rewrite<'a>(&self, html: &'a str, asset_dir: &str) -> Cow<'a, str> {
        self.pattern.replace_all(html, |caps: &Captures<'_>| {
            format!(
                "{}{}=\"{}\"{}",
                &caps[1],
                &caps[2],
                self.url(asset_dir, &caps[3]),
                &caps[4]
            )
        })
    }
}

/// Applies a [`RewriteRule`] to HTML assets, or nothing when inactive.
#[derive(Debug, Clone)]
pub struct CdnTransform {
    rule: Option<RewriteRule>,
}

impl CdnTransform {
    /// Active transform using `rule`.
    pub fn active(rule: RewriteRule) -> Self {
        Self { rule: Some(rule) }
    }

    /// Transform that passes every asset through byte-identical.
    pub fn inactive() -> Self {
        Self { rule: None }
    }

    pub fn is_active(&self) -> bool {
        self.rule.is_some()
    }
}

impl Transform for CdnTransform {
    fn apply(&self, asset: Asset) -> Asset {
        let Some(rule) = &self.rule else {
            return asset;
        };
        if asset.kind != AssetKind::Html {
            return asset;
        }
        let Content::Text(text) = &asset.content else {
            return asset;
        };

        let rewritten = match rule.rewrite(text, asset.dir()) {
            Cow::Borrowed(_) => return asset,
            Cow::Owned(rewritten) => rewritten,
        };
        Asset {
            content: Content::Text(rewritten),
            ..asset
        }
    }
}
