//! Source-relative paths in POSIX form.
//!
//! Rewritten URLs always use `/` separators regardless of the host platform,
//! so relative paths are carried as strings once they leave the filesystem.

use std::path::{Component, Path};

/// Render a relative path with `/` separators.
pub fn to_posix(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

/// Directory part of a relative POSIX path (`""` for top-level files).
pub fn dirname(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Join two relative POSIX paths, normalizing `.` and `..` segments.
///
/// A `..` with nothing left to pop is kept, so the result may start with `../`.
pub fn join(base: &str, rel: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(rel.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_posix() {
        let path: PathBuf = ["pages", "img", "logo.png"].iter().collect();
        assert_eq!(to_posix(&path), "pages/img/logo.png");
        assert_eq!(to_posix(Path::new("./index.html")), "index.html");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("pages/index.html"), "pages");
        assert_eq!(dirname("a/b/c.html"), "a/b");
        assert_eq!(dirname("index.html"), "");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("pages", "img/logo.png"), "pages/img/logo.png");
        assert_eq!(join("", "img/logo.png"), "img/logo.png");
        assert_eq!(join(".", "img/logo.png"), "img/logo.png");
        assert_eq!(join("a/b", "./img/x.png"), "a/b/img/x.png");
        assert_eq!(join("a/b", "img/../img/x.png"), "a/b/img/x.png");
    }

    #[test]
    fn test_join_climbs_past_base() {
        assert_eq!(join("", "img/../../x.png"), "../x.png");
        assert_eq!(join("a", "../../../x.png"), "../../x.png");
        assert_eq!(join("a/b", "../x.png"), "a/x.png");
    }
}
