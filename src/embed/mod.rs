//! Embedded static resources.
//!
//! - `template` - Template types for typed variable injection
//! - `serve` - Dev server resources (hotreload.js)

mod template;

pub use template::{Template, TemplateVars};

pub mod serve {
    use super::{Template, TemplateVars};

    /// URL the dev server answers with the reload client.
    pub const HOTRELOAD_URL: &str = "/__inlay/hotreload.js";

    /// Variables for hotreload.js template.
    pub struct HotreloadVars {
        pub ws_port: u16,
    }

    impl TemplateVars for HotreloadVars {
        fn apply(&self, content: &str) -> String {
            content.replace("__INLAY_WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Live reload client: connects to the reload channel and reconnects
    /// when the dev server restarts.
    pub const HOTRELOAD_JS: Template<HotreloadVars> =
        Template::new(include_str!("serve/hotreload.js"));

    /// `<script>` tag loading the reload client.
    pub fn hotreload_tag() -> String {
        format!(r#"<script src="{HOTRELOAD_URL}" defer></script>"#)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_port_substituted() {
            let js = HOTRELOAD_JS.render(&HotreloadVars { ws_port: 40001 });
            assert!(js.contains("40001"));
            assert!(!js.contains("__INLAY_WS_PORT__"));
        }

        #[test]
        fn test_tag_points_at_served_url() {
            assert!(hotreload_tag().contains(HOTRELOAD_URL));
        }
    }
}
