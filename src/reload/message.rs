//! Live reload message protocol.
//!
//! JSON messages sent from the reload channel to browser clients.
//!
//! # Message Types
//!
//! - `connected`: Sent once after the handshake
//! - `reload`: Reload the page, with an optional reason for the console

use serde::{Deserialize, Serialize};

/// Message sent over the reload WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },

    /// Full page reload
    Reload {
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl ReloadMessage {
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    #[cfg(test)]
    pub fn reload() -> Self {
        Self::Reload { reason: None }
    }

    pub fn reload_with_reason(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: Some(reason.into()),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload"}"#.to_string())
    }

    /// Parse from JSON string
    #[cfg(test)]
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_message() {
        assert_eq!(ReloadMessage::reload().to_json(), r#"{"type":"reload"}"#);
        assert_eq!(
            ReloadMessage::reload_with_reason("pages/index.html").to_json(),
            r#"{"type":"reload","reason":"pages/index.html"}"#
        );
    }

    #[test]
    fn test_connected_roundtrip() {
        let msg = ReloadMessage::connected();
        let json = msg.to_json();
        assert!(json.starts_with(r#"{"type":"connected""#));
        assert_eq!(ReloadMessage::from_json(&json), Some(msg));
    }
}
