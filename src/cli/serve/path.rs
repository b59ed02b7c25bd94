//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve URL to filesystem path, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string and fragment, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("pages/img")).unwrap();
        fs::write(temp.path().join("index.html"), "root").unwrap();
        fs::write(temp.path().join("pages/index.html"), "page").unwrap();
        fs::write(temp.path().join("pages/img/a b.png"), "png").unwrap();
        temp
    }

    #[test]
    fn test_directory_index() {
        let temp = site();
        let root = temp.path();
        let expected = root.join("pages/index.html").canonicalize().unwrap();
        assert_eq!(resolve_path("/pages/", root), Some(expected.clone()));
        assert_eq!(resolve_path("/pages", root), Some(expected));
        assert!(resolve_path("/", root).unwrap().ends_with("index.html"));
    }

    #[test]
    fn test_decodes_and_strips_query() {
        let temp = site();
        let path = resolve_path("/pages/img/a%20b.png?v=2", temp.path()).unwrap();
        assert!(path.ends_with("a b.png"));
    }

    #[test]
    fn test_rejects_traversal_and_missing() {
        let temp = site();
        assert_eq!(resolve_path("/../etc/passwd", temp.path()), None);
        assert_eq!(resolve_path("/pages/%2e%2e/%2e%2e/x", temp.path()), None);
        assert_eq!(resolve_path("/missing.html", temp.path()), None);
    }
}
