//! Content types for files the dev server hands out.
//!
//! Pages reference markup, compiled stylesheets, images and the odd web
//! font; everything else goes out as a byte stream.

use std::path::Path;

pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
    pub const BINARY: &str = "application/octet-stream";
}

/// Extension (lowercase) to content type.
const TABLE: &[(&str, &str)] = &[
    ("html", types::HTML),
    ("htm", types::HTML),
    ("css", types::CSS),
    ("js", types::JAVASCRIPT),
    ("txt", types::PLAIN),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
];

/// Content type for `path`, by extension.
pub fn from_path(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return types::BINARY;
    };
    TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map_or(types::BINARY, |&(_, mime)| mime)
}

/// Whether a content type is an HTML document.
pub fn is_html(mime: &str) -> bool {
    mime.starts_with("text/html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(Path::new("index.html")), types::HTML);
        assert_eq!(from_path(Path::new("styles/ok.css")), types::CSS);
        assert_eq!(from_path(Path::new("img/logo.png")), "image/png");
        assert_eq!(from_path(Path::new("img/PHOTO.JPG")), "image/jpeg");
        assert_eq!(from_path(Path::new("styles/main.scss")), types::BINARY);
        assert_eq!(from_path(Path::new("Makefile")), types::BINARY);
    }

    #[test]
    fn test_is_html() {
        assert!(is_html(types::HTML));
        assert!(!is_html(types::CSS));
    }
}
