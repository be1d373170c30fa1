//! Browser-cookie session storage.
//!
//! Sessions live in a signed cookie; the server keeps no session table. A
//! cookie that is missing, tampered with, expired, unparseable or names a
//! user who is no longer configured reads as "no session".

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use futsal_core::auth::{SessionData, SessionStore};
use tracing::debug;

use crate::state::SessionSettings;

/// Cookie remembering the last selected match
pub const MATCH_COOKIE: &str = "ffwc_match";

/// Session store over the request's signed cookie jar.
///
/// Changes are collected in the jar; return `into_jar()` from the handler
/// so they reach the browser.
pub struct CookieSessionStore<'a> {
    jar: SignedCookieJar,
    settings: &'a SessionSettings,
    remember: bool,
}

impl<'a> CookieSessionStore<'a> {
    pub fn new(jar: SignedCookieJar, settings: &'a SessionSettings) -> Self {
        Self {
            jar,
            settings,
            remember: false,
        }
    }

    /// Persist the next session for `cookie_days` instead of the browser session
    pub fn remember(mut self, remember: bool) -> Self {
        self.remember = remember;
        self
    }

    pub fn into_jar(self) -> SignedCookieJar {
        self.jar
    }

    fn update(&mut self, f: impl FnOnce(SignedCookieJar) -> SignedCookieJar) {
        self.jar = f(self.jar.clone());
    }
}

impl SessionStore for CookieSessionStore<'_> {
    fn set_session(&mut self, session: SessionData) {
        let mut cookie = Cookie::build((self.settings.cookie_name.clone(), session.to_cookie_value()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        if self.remember {
            cookie = cookie.max_age(time::Duration::days(self.settings.cookie_days));
        }
        self.update(|jar| jar.add(cookie));
    }

    fn get_session(&self) -> Option<SessionData> {
        let cookie = self.jar.get(&self.settings.cookie_name)?;
        let Some(session) = SessionData::from_cookie_value(cookie.value()) else {
            debug!("Malformed session cookie");
            return None;
        };
        if !self.settings.users.contains(&session.username) {
            debug!(user = %session.username, "Session for unknown user");
            return None;
        }
        if session.is_expired(chrono::Duration::days(self.settings.cookie_days)) {
            debug!(user = %session.username, "Session expired");
            return None;
        }
        Some(session)
    }

    fn clear_session(&mut self) {
        let name = self.settings.cookie_name.clone();
        self.update(|jar| jar.remove(Cookie::build((name, "")).path("/")));
    }
}

/// Match id remembered from a previous page
pub fn selected_match(jar: &SignedCookieJar) -> Option<String> {
    jar.get(MATCH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|id| !id.is_empty())
}

pub fn remember_match(jar: SignedCookieJar, match_id: &str) -> SignedCookieJar {
    jar.add(
        Cookie::build((MATCH_COOKIE, match_id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

pub fn forget_match(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build((MATCH_COOKIE, "")).path("/"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum_extra::extract::cookie::Key;
    use chrono::{Duration, Utc};
    use futsal_core::auth::UserDirectory;

    use super::*;

    fn settings() -> SessionSettings {
        SessionSettings {
            cookie_name: "ffwc_user".to_string(),
            cookie_days: 7,
            users: UserDirectory::new(HashMap::from([("coach".to_string(), "pw".to_string())])),
        }
    }

    #[test]
    fn test_set_get_clear() {
        let settings = settings();
        let mut store = CookieSessionStore::new(SignedCookieJar::new(Key::generate()), &settings);
        assert!(store.get_session().is_none());

        let session = SessionData::new("coach");
        store.set_session(session.clone());
        assert_eq!(store.get_session(), Some(session));

        store.clear_session();
        assert!(store.get_session().is_none());
    }

    #[test]
    fn test_remember_sets_max_age() {
        let settings = settings();
        let mut store =
            CookieSessionStore::new(SignedCookieJar::new(Key::generate()), &settings).remember(true);
        store.set_session(SessionData::new("coach"));
        let jar = store.into_jar();
        let cookie = jar.get("ffwc_user").unwrap();
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_unknown_user_and_expired_sessions_are_rejected() {
        let settings = settings();
        let mut store = CookieSessionStore::new(SignedCookieJar::new(Key::generate()), &settings);

        store.set_session(SessionData::new("intruder"));
        assert!(store.get_session().is_none());

        let mut old = SessionData::new("coach");
        old.created_at = Utc::now() - Duration::days(8);
        store.set_session(old);
        assert!(store.get_session().is_none());
    }

    #[test]
    fn test_unsigned_cookie_is_no_session() {
        let settings = settings();
        let value = SessionData::new("coach").to_cookie_value();
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("ffwc_user={}", value).parse().unwrap(),
        );

        let jar = SignedCookieJar::from_headers(&headers, Key::generate());
        let store = CookieSessionStore::new(jar, &settings);
        assert!(store.get_session().is_none());
    }

    #[test]
    fn test_match_cookie() {
        let jar = SignedCookieJar::new(Key::generate());
        assert_eq!(selected_match(&jar), None);
        let jar = remember_match(jar, "400235458");
        assert_eq!(selected_match(&jar).as_deref(), Some("400235458"));
        let jar = forget_match(jar);
        assert_eq!(selected_match(&jar), None);
    }
}
