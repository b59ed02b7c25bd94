//! Configuration error types.

use owo_colors::OwoColorize;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("{}", format_validation(.field, .message, .hint))]
    Validation {
        /// Config field path (e.g., "cdn.base")
        field: &'static str,
        message: String,
        hint: Option<&'static str>,
    },
}

impl ConfigError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(self, hint: &'static str) -> Self {
        match self {
            Self::Validation { field, message, .. } => Self::Validation {
                field,
                message,
                hint: Some(hint),
            },
            other => other,
        }
    }
}

fn format_validation(field: &str, message: &str, hint: &Option<&str>) -> String {
    let mut out = format!(
        "{}{}{}\n{} {}",
        "[".dimmed(),
        field.cyan(),
        "]".dimmed(),
        "→".red(),
        message
    );
    if let Some(hint) = hint {
        out.push_str(&format!("\n  {} {}", "hint:".yellow(), hint));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_contains_field_and_hint() {
        let err = ConfigError::validation("cdn.base", "must not be empty")
            .with_hint("set [cdn] base in inlay.toml");
        let text = err.to_string();
        assert!(text.contains("cdn.base"));
        assert!(text.contains("must not be empty"));
        assert!(text.contains("set [cdn] base"));
    }
}
