//! Reload script injection.

use crate::{embed::serve::hotreload_tag, utils::mime::is_html};

/// Inject the reload script if content is HTML and the reload channel is on
pub fn maybe_inject_hotreload(body: Vec<u8>, content_type: &str, reload: bool) -> Vec<u8> {
    if reload && is_html(content_type) {
        inject_hotreload_script(&body)
    } else {
        body
    }
}

/// Inject reload script before `</body>` tag
fn inject_hotreload_script(content: &[u8]) -> Vec<u8> {
    let script = hotreload_tag();
    let script_bytes = script.as_bytes();

    const PATTERN: &[u8] = b"</body>";

    let pos = content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
        .unwrap_or(content.len());

    let mut result = Vec::with_capacity(content.len() + script_bytes.len());
    result.extend_from_slice(&content[..pos]);
    result.extend_from_slice(script_bytes);
    result.extend_from_slice(&content[pos..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mime::types::{CSS, HTML};

    #[test]
    fn test_injects_before_body_close() {
        let out = maybe_inject_hotreload(b"<p>x</p></BODY></html>".to_vec(), HTML, true);
        let out = String::from_utf8(out).unwrap();
        let script = out.find("<script").unwrap();
        assert!(script < out.find("</BODY>").unwrap());
    }

    #[test]
    fn test_appends_without_body() {
        let out = maybe_inject_hotreload(b"<p>x</p>".to_vec(), HTML, true);
        assert!(String::from_utf8(out).unwrap().ends_with("</script>"));
    }

    #[test]
    fn test_leaves_other_content_alone() {
        let css = b"body{}".to_vec();
        assert_eq!(maybe_inject_hotreload(css.clone(), CSS, true), css);
        let html = b"<p></p></body>".to_vec();
        assert_eq!(maybe_inject_hotreload(html.clone(), HTML, false), html);
    }
}
