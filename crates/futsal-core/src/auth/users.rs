use std::collections::HashMap;

use tracing::warn;

/// Default credentials when neither the config file nor the environment
/// name a user.
const DEFAULT_USER: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

/// The set of accounts allowed to log into the dashboard.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: HashMap<String, String>,
}

impl UserDirectory {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }

    /// Configured users take precedence; otherwise a single account from
    /// `env_user`/`env_password`, falling back to `admin`/`admin`.
    pub fn resolve(
        configured: Option<&HashMap<String, String>>,
        env_user: Option<String>,
        env_password: Option<String>,
    ) -> Self {
        if let Some(users) = configured.filter(|u| !u.is_empty()) {
            return Self::new(users.clone());
        }

        let user = env_user.unwrap_or_else(|| DEFAULT_USER.to_string());
        let password = env_password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
        if user == DEFAULT_USER && password == DEFAULT_PASSWORD {
            warn!("Using default admin/admin credentials; set APP_USER and APP_PASSWORD");
        }
        Self::new(HashMap::from([(user, password)]))
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|expected| expected == password)
            .unwrap_or(false)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
