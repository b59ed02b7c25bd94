//! CSS inlining.
//!
//! `<style>` blocks and linked stylesheets are folded into `style`
//! attributes. At-rules such as `@media` survive in a trailing `<style>`
//! block, and no width or table presentation attributes are ever added.
//! In production, `class` and `id` attributes that no surviving rule
//! refers to are stripped afterwards.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum InlineError {
    #[error("cannot use {} as stylesheet base", .0.display())]
    BaseDir(PathBuf),
    #[error(transparent)]
    Inline(#[from] css_inline::InlineError),
}

/// Mode-dependent inlining options.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineOptions {
    /// Remove `class`/`id` attributes no longer referenced by a style block.
    pub strip_selectors: bool,
}

/// CSS inliner: html text plus the directory stylesheets resolve against.
pub trait CssInliner: Send + Sync {
    fn inline(
        &self,
        html: &str,
        base_dir: &Path,
        options: &InlineOptions,
    ) -> Result<String, InlineError>;
}

/// Inliner backed by the `css-inline` crate.
pub struct CssInlineEngine;

impl CssInliner for CssInlineEngine {
    fn inline(
        &self,
        html: &str,
        base_dir: &Path,
        options: &InlineOptions,
    ) -> Result<String, InlineError> {
        let base_url = Url::from_directory_path(base_dir)
            .map_err(|()| InlineError::BaseDir(base_dir.to_path_buf()))?;

        let inliner = css_inline::CSSInliner::options()
            .inline_style_tags(true)
            .keep_style_tags(false)
            .keep_link_tags(false)
            .keep_at_rules(true)
            .load_remote_stylesheets(true)
            .base_url(Some(base_url))
            .build();

        let inlined = inliner.inline(html)?;
        Ok(if options.strip_selectors {
            strip_selectors(&inlined)
        } else {
            inlined
        })
    }
}

// =============================================================================
// Selector stripping
// =============================================================================

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style[^>]*>(.*?)</style>").unwrap());

static CLASS_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z_-][A-Za-z0-9_-]*)").unwrap());

static ID_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z_-][A-Za-z0-9_-]*)").unwrap());

static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([ \t\r\n\x0C]+)([cC][lL][aA][sS][sS])="([^"]*)""#).unwrap()
});

static ID_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([ \t\r\n\x0C]+)[iI][dD]="([^"]*)""#).unwrap());

/// Drop `class` tokens and `id` attributes that no `<style>` block uses.
pub fn strip_selectors(html: &str) -> String {
    let mut classes = FxHashSet::default();
    let mut ids = FxHashSet::default();
    for block in STYLE_BLOCK.captures_iter(html) {
        let css = &block[1];
        classes.extend(CLASS_SELECTOR.captures_iter(css).map(|c| c[1].to_string()));
        ids.extend(ID_SELECTOR.captures_iter(css).map(|c| c[1].to_string()));
    }

    let html = CLASS_ATTR.replace_all(html, |caps: &Captures<'_>| {
        let kept: Vec<&str> = caps[3]
            .split_ascii_whitespace()
            .filter(|name| classes.contains(*name))
            .collect();
        if kept.is_empty() {
            String::new()
        } else {
            format!("{}{}=\"{}\"", &caps[1], &caps[2], kept.join(" "))
        }
    });

    let html = ID_ATTR.replace_all(&html, |caps: &Captures<'_>| {
        if ids.contains(&caps[2]) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    html.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_strip_unreferenced() {
        let html = r#"<p class="a b" id="x">t</p>"#;
        assert_eq!(strip_selectors(html), "<p>t</p>");
    }

    #[test]
    fn test_strip_keeps_media_selectors() {
        let html = concat!(
            "<html><head><style>@media (max-width: 600px) { .wide { width: 100%; } #hero { display: none; } }</style></head>",
            r#"<body><td class="wide cell" id="hero">a</td><td class="cell" id="other">b</td></body></html>"#,
        );
        let out = strip_selectors(html);
        assert!(out.contains(r#"<td class="wide" id="hero">a</td>"#));
        assert!(out.contains("<td>b</td>"));
    }

    #[test]
    fn test_strip_leaves_other_attributes() {
        let html = r#"<a href="x.html" class="btn" data-id="7">go</a>"#;
        assert_eq!(strip_selectors(html), r#"<a href="x.html" data-id="7">go</a>"#);
    }

    #[test]
    fn test_inline_style_tag() {
        let temp = TempDir::new().unwrap();
        let html = r#"<html><head><style>.a { color: red; }</style></head><body><p class="a">x</p></body></html>"#;

        let out = CssInlineEngine
            .inline(html, temp.path(), &InlineOptions::default())
            .unwrap();

        assert!(out.contains("class=\"a\""));
        assert!(out.contains("style=\""));
        assert!(out.contains("red"));
    }

    #[test]
    fn test_inline_linked_stylesheet_relative_to_base() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("styles")).unwrap();
        fs::write(temp.path().join("styles/main.css"), ".b { color: blue; }").unwrap();
        let html = r#"<html><head><link rel="stylesheet" href="styles/main.css"></head><body><p class="b">x</p></body></html>"#;

        let out = CssInlineEngine
            .inline(html, temp.path(), &InlineOptions::default())
            .unwrap();

        assert!(!out.contains("<link"));
        assert!(out.contains("blue"));
    }

    #[test]
    fn test_inline_production_strips() {
        let temp = TempDir::new().unwrap();
        let html = r#"<html><head><style>.a { color: red; }</style></head><body><p class="a" id="p1">x</p></body></html>"#;

        let out = CssInlineEngine
            .inline(html, temp.path(), &InlineOptions { strip_selectors: true })
            .unwrap();

        assert!(out.contains("red"));
        assert!(!out.contains("class="));
        assert!(!out.contains("id="));
    }

    #[test]
    fn test_inline_keeps_media_and_adds_no_presentation_attributes() {
        let temp = TempDir::new().unwrap();
        let html = concat!(
            "<html><head><style>.a { color: red; } ",
            "@media (max-width: 600px) { .a { color: blue; } }</style></head>",
            r#"<body><table><tr><td><p class="a">x</p></td></tr></table></body></html>"#,
        );

        let out = CssInlineEngine
            .inline(html, temp.path(), &InlineOptions::default())
            .unwrap();

        assert!(out.contains("@media"), "{out}");
        assert!(out.contains("blue"), "{out}");
        assert!(out.contains("red"), "{out}");
        for attr in ["width=", "height=", "cellpadding=", "cellspacing=", "bgcolor=", "align="] {
            assert!(!out.contains(attr), "{attr} in {out}");
        }
    }

    #[test]
    fn test_inline_production_keeps_media_selectors() {
        let temp = TempDir::new().unwrap();
        let html = concat!(
            "<html><head><style>.a { color: red; } ",
            "@media (max-width: 600px) { .a { color: blue; } }</style></head>",
            r#"<body><p class="a b">x</p></body></html>"#,
        );

        let out = CssInlineEngine
            .inline(html, temp.path(), &InlineOptions { strip_selectors: true })
            .unwrap();

        assert!(out.contains("@media"), "{out}");
        assert!(out.contains(r#"class="a""#), "{out}");
    }
}
