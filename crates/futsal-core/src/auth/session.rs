use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of generated session tokens
const TOKEN_LENGTH: usize = 32;

/// A logged-in browser session.
///
/// The token is opaque; nothing on the server keeps a record of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    /// Start a new session for `username` with a fresh random token
    pub fn new(username: &str) -> Self {
        let token = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        Self {
            token,
            username: username.to_string(),
            // Second precision, the cookie form cannot carry more
            created_at: Utc
                .timestamp_opt(Utc::now().timestamp(), 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }

    pub fn is_expired(&self, max_age: Duration) -> bool {
        Utc::now() > self.created_at + max_age
    }

    /// Serialize as `{created_at_unix}:{token}:{username}` for cookie storage
    pub fn to_cookie_value(&self) -> String {
        format!("{}:{}:{}", self.created_at.timestamp(), self.token, self.username)
    }

    /// Parse the cookie form. Anything malformed is treated as no session.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let mut parts = value.splitn(3, ':');
        let created = parts.next()?.parse::<i64>().ok()?;
        let token = parts.next()?;
        let username = parts.next()?;
        if token.is_empty() || username.is_empty() {
            return None;
        }
        let created_at = Utc.timestamp_opt(created, 0).single()?;
        Some(Self {
            token: token.to_string(),
            username: username.to_string(),
            created_at,
        })
    }
}

/// Client-side storage of the current session.
///
/// Implementations degrade to "no session" when the backing storage is
/// unavailable; they never fail.
pub trait SessionStore {
    fn set_session(&mut self, session: SessionData);
    fn get_session(&self) -> Option<SessionData>;
    fn clear_session(&mut self);
}

/// Session store held in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    data: Option<SessionData>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn set_session(&mut self, session: SessionData) {
        self.data = Some(session);
    }

    fn get_session(&self) -> Option<SessionData> {
        self.data.clone()
    }

    fn clear_session(&mut self) {
        self.data = None;
    }
}
