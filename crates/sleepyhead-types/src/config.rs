//! Application configuration types for SleepyHead.
//!
//! `AppConfig` represents the `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_SESSION_ID;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub journal: JournalConfig,
}

/// Settings for the remote chat service client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the chat service (no trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value sent as `session_id` with every chat request.
    #[serde(default = "default_session_id")]
    pub session_id: String,

    /// Upper bound on a single chat round-trip, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_id: default_session_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Settings for the thought journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// How long a notice stays visible, in seconds.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: u64,

    /// Command that receives the journal on stdin when printing.
    #[serde(default = "default_print_command")]
    pub print_command: String,
}

fn default_notice_ttl_secs() -> u64 {
    3
}

fn default_print_command() -> String {
    "lp".to_string()
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            notice_ttl_secs: default_notice_ttl_secs(),
            print_command: default_print_command(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.chat.base_url, "http://localhost:5001");
        assert_eq!(config.chat.session_id, "default");
        assert_eq!(config.chat.request_timeout_secs, 30);
        assert_eq!(config.journal.notice_ttl_secs, 3);
        assert_eq!(config.journal.print_command, "lp");
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.chat.request_timeout_secs, 30);
        assert_eq!(config.journal.print_command, "lp");
    }

    #[test]
    fn test_app_config_deserialize_partial() {
        let toml_str = r#"
[chat]
base_url = "http://10.0.0.2:5000"
request_timeout_secs = 5

[journal]
print_command = "lpr"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.chat.session_id, "default");
        assert_eq!(config.chat.request_timeout_secs, 5);
        assert_eq!(config.journal.print_command, "lpr");
        assert_eq!(config.journal.notice_ttl_secs, 3);
    }
}
