//! Application configuration management.
//!
//! This module handles loading the dashboard configuration: the API base
//! URL and tournament identifiers, the listen address, cookie settings,
//! optional login accounts and team colours.
//!
//! Configuration is read from `~/.config/futsal-dashboard/config.json`.
//! Every field has a default, so a missing file or a partial file is fine.
//! The API base URL is only ever taken from this file, never from the
//! environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::colors::TeamColors;

/// Application name used for the config directory path
const APP_NAME: &str = "futsal-dashboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// FIFA data API
pub const DEFAULT_BASE_URL: &str = "https://api.fifa.com/api/v3";

/// FIFA Futsal World Cup competition, season and stage identifiers
pub const DEFAULT_COMPETITION_ID: &str = "106";
pub const DEFAULT_SEASON_ID: &str = "288439";
pub const DEFAULT_STAGE_ID: &str = "288440";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Upper bound on matches requested from the calendar endpoint
const DEFAULT_MATCHES_COUNT: u32 = 500;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

const DEFAULT_COOKIE_NAME: &str = "ffwc_user";
const DEFAULT_COOKIE_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub language: String,
    pub competition_id: String,
    pub season_id: String,
    pub stage_id: String,
    pub matches_count: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            competition_id: DEFAULT_COMPETITION_ID.to_string(),
            season_id: DEFAULT_SEASON_ID.to_string(),
            stage_id: DEFAULT_STAGE_ID.to_string(),
            matches_count: DEFAULT_MATCHES_COUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub cookie_name: String,
    pub cookie_days: i64,
    /// username -> password; when absent, APP_USER/APP_PASSWORD are used
    pub users: Option<HashMap<String, String>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_days: DEFAULT_COOKIE_DAYS,
            users: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    /// Keyed by FIFA abbreviation (`ARG`) or upper-cased team name
    pub team_colors: HashMap<String, TeamColors>,
}

impl Config {
    /// Load from the default location, or defaults if there is no file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!(error = %e, "No config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!(path = %path.display(), "Loading config");
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply cookie overrides from the environment (`FFWC_COOKIE_NAME`,
    /// `FFWC_COOKIE_DAYS`). Invalid values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("FFWC_COOKIE_NAME").filter(|n| !n.trim().is_empty()) {
            self.auth.cookie_name = name.trim().to_string();
        }
        if let Some(days) = lookup("FFWC_COOKIE_DAYS") {
            match days.trim().parse::<i64>() {
                Ok(d) if d > 0 => self.auth.cookie_days = d,
                _ => warn!(value = %days, "Ignoring invalid FFWC_COOKIE_DAYS"),
            }
        }
    }
}
