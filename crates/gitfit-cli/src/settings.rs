use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MIN_WINDOW_DAYS: u32 = 1;
pub const MAX_WINDOW_DAYS: u32 = 3_660; // ten years

const WINDOW_DAYS_ENV: &str = "GITFIT_WINDOW_DAYS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub window_days: Option<u32>,
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub github_connected: bool,
    #[serde(default)]
    pub events_path: Option<PathBuf>,
}

impl Settings {
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("gitfit");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir.join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .ok()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// Default window length in days.
    /// Priority: GITFIT_WINDOW_DAYS env var > settings.json > none (trailing year)
    pub fn default_window_days(&self) -> Option<u32> {
        resolve_window_days(std::env::var(WINDOW_DAYS_ENV).ok().as_deref(), self.window_days)
    }

    /// Saved event feed of the connected account, if any.
    pub fn connected_events_path(&self) -> Option<&PathBuf> {
        if self.github_connected {
            self.events_path.as_ref()
        } else {
            None
        }
    }
}

fn resolve_window_days(env_value: Option<&str>, configured: Option<u32>) -> Option<u32> {
    env_value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .or(configured)
        .map(|days| days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS))
}
