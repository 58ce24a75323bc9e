//! Settings and planner construction shared by every command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use planner_client::{ApiClient, Session};
use planner_core::{KeyringTokenStore, Planner, Settings};
use tracing::debug;

/// Loaded settings for one run.
#[derive(Debug)]
pub struct App {
    /// Settings as stored on disk.
    pub stored: Settings,
    /// Stored settings with environment and flag overrides applied.
    pub settings: Settings,
    /// Location of the settings file.
    pub path: PathBuf,
}

impl App {
    /// Loads settings and applies `PLANNER_*` variables, then the flags.
    pub async fn load(api: Option<String>, ws: Option<String>) -> Result<Self> {
        let path = Settings::default_path();
        let stored = Settings::load_from(&path)
            .await
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
        let settings = stored.clone().with_env_overrides().with_overrides(api, ws);
        debug!("Using API at {}", settings.api_base_url);
        Ok(Self {
            stored,
            settings,
            path,
        })
    }

    /// Builds a planner over the keyring-backed session with `date` selected.
    pub fn planner(&self, date: NaiveDate) -> Result<Planner> {
        let session = Session::new(KeyringTokenStore::default());
        let client = ApiClient::new(&self.settings.api_base_url, session)
            .with_context(|| format!("Invalid API URL {}", self.settings.api_base_url))?;
        Ok(Planner::new(client, date))
    }
}

/// Current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
