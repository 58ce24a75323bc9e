//! Persistent client settings.
//!
//! Stored as JSON at `<config_dir>/planner/settings.json`. A missing file
//! yields the defaults; `PLANNER_API_BASE_URL` and `PLANNER_WS_URL` override
//! the stored URLs for one run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::calendar::ViewDensity;
use crate::error::{Error, Result};

/// Default API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Path of the push endpoint on the API host.
pub const PUSH_PATH: &str = "/rawws";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "PLANNER_API_BASE_URL";

/// Environment variable overriding the push URL.
pub const WS_URL_ENV: &str = "PLANNER_WS_URL";

const DEFAULT_POLL_SECS: u64 = 20;

/// Client settings that persist across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the REST API.
    pub api_base_url: String,
    /// Push channel URL; derived from the API base when absent.
    pub ws_url: Option<String>,
    /// Grid density.
    pub density: ViewDensity,
    /// Seconds between unread-notification polls in watch mode.
    pub notification_poll_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_url: None,
            density: ViewDensity::default(),
            notification_poll_secs: DEFAULT_POLL_SECS,
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("planner")
            .join("settings.json")
    }

    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes settings to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;
        info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Applies `PLANNER_API_BASE_URL` and `PLANNER_WS_URL` when set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(WS_URL_ENV).ok(),
        )
    }

    /// Applies explicit overrides; blank values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, api_base_url: Option<String>, ws_url: Option<String>) -> Self {
        if let Some(api) = api_base_url.filter(|s| !s.trim().is_empty()) {
            self.api_base_url = api.trim().to_string();
        }
        if let Some(ws) = ws_url.filter(|s| !s.trim().is_empty()) {
            self.ws_url = Some(ws.trim().to_string());
        }
        self
    }

    /// Push channel URL: the configured one, else derived from the API base.
    ///
    /// # Errors
    ///
    /// Returns an error if no URL is configured and the API base cannot be
    /// turned into one.
    pub fn push_url(&self) -> Result<String> {
        match self.ws_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Ok(url.to_string()),
            _ => derive_push_url(&self.api_base_url),
        }
    }

    /// Interval between notification polls, at least one second.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.notification_poll_secs.max(1))
    }
}

/// Derives the push URL from an API base: `http` becomes `ws`, `https`
/// becomes `wss`, host and port are kept and the path is `/rawws`.
///
/// # Errors
///
/// Returns an error for unparsable URLs, URLs without a host or schemes other
/// than `http` and `https`.
pub fn derive_push_url(api_base_url: &str) -> Result<String> {
    let url = Url::parse(api_base_url.trim())
        .map_err(|e| Error::Config(format!("invalid API URL {api_base_url}: {e}")))?;
    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => return Err(Error::Config(format!("unsupported API scheme: {other}"))),
    };
    let host = url
        .host_str()
        .ok_or_else(|| Error::Config(format!("API URL has no host: {api_base_url}")))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| Error::Config(format!("API URL has no port: {api_base_url}")))?;
    Ok(format!("{scheme}://{host}:{port}{PUSH_PATH}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert_eq!(settings.density, ViewDensity::Detailed);
        assert_eq!(settings.poll_interval(), Duration::from_secs(20));
        assert_eq!(settings.push_url().unwrap(), "ws://localhost:8080/rawws");
    }

    #[test]
    fn test_derive_push_url() {
        assert_eq!(
            derive_push_url("https://plan.example.com").unwrap(),
            "wss://plan.example.com:443/rawws"
        );
        assert_eq!(
            derive_push_url("http://10.0.0.2:9000/api/").unwrap(),
            "ws://10.0.0.2:9000/rawws"
        );
        assert!(derive_push_url("ftp://example.com").is_err());
        assert!(derive_push_url("not a url").is_err());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides(
            Some("https://api.example.com".into()),
            Some("  ".into()),
        );
        assert_eq!(settings.api_base_url, "https://api.example.com");
        assert_eq!(settings.ws_url, None);
        assert_eq!(settings.push_url().unwrap(), "wss://api.example.com:443/rawws");

        let settings = settings.with_overrides(None, Some("ws://push:1/rawws".into()));
        assert_eq!(settings.push_url().unwrap(), "ws://push:1/rawws");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"density":"compact"}"#).unwrap();
        assert_eq!(settings.density, ViewDensity::Compact);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.notification_poll_secs, 20);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("planner-settings-{}", std::process::id()));
        let path = dir.join("settings.json");

        assert_eq!(Settings::load_from(&path).await.unwrap(), Settings::default());

        let settings = Settings {
            density: ViewDensity::Week,
            notification_poll_secs: 0,
            ..Settings::default()
        };
        settings.save_to(&path).await.unwrap();
        let loaded = Settings::load_from(&path).await.unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.poll_interval(), Duration::from_secs(1));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
