//! Shared application state handed to every request handler.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use futsal_core::auth::UserDirectory;
use futsal_core::colors::TeamColors;
use futsal_core::{ApiClient, Config, FutsalData};

/// Cookie and account settings used by the session store
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub cookie_days: i64,
    pub users: UserDirectory,
}

/// Clone is cheap: everything heavy sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<FutsalData>,
    pub sessions: Arc<SessionSettings>,
    pub team_colors: Arc<HashMap<String, TeamColors>>,
    key: Key,
}

impl AppState {
    pub fn new(
        data: FutsalData,
        sessions: SessionSettings,
        team_colors: HashMap<String, TeamColors>,
        key: Key,
    ) -> Self {
        Self {
            data: Arc::new(data),
            sessions: Arc::new(sessions),
            team_colors: Arc::new(team_colors),
            key,
        }
    }

    /// Build the state from a loaded configuration
    pub fn from_config(config: &Config, users: UserDirectory, key: Key) -> Result<Self> {
        let client = ApiClient::new(&config.api.base_url, &config.api.language)?;
        let data = FutsalData::new(client, config.api.clone());
        let sessions = SessionSettings {
            cookie_name: config.auth.cookie_name.clone(),
            cookie_days: config.auth.cookie_days,
            users,
        };
        Ok(Self::new(data, sessions, config.team_colors.clone(), key))
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
