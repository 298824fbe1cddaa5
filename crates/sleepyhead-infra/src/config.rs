//! Configuration loader for SleepyHead.
//!
//! Reads `config.toml` from the data directory (`~/.sleepyhead/` by default)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use sleepyhead_types::config::AppConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SLEEPYHEAD_DATA_DIR";

/// Environment variable overriding `chat.base_url`.
pub const API_URL_ENV: &str = "SLEEPYHEAD_API_URL";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority: `SLEEPYHEAD_DATA_DIR`, then `~/.sleepyhead`, then `./.sleepyhead`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".sleepyhead");
    }

    PathBuf::from(".sleepyhead")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Apply an explicit base URL override (from the environment or a CLI flag).
///
/// Blank overrides are ignored.
pub fn apply_api_url_override(config: &mut AppConfig, api_url: Option<&str>) {
    if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
        config.chat.base_url = url.trim_end_matches('/').to_string();
    }
}
