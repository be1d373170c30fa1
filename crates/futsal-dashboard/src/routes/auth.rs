//! Login and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::SignedCookieJar;
use futsal_core::auth::{SessionData, SessionStore};
use serde::Deserialize;
use tracing::{info, warn};

use crate::render::layout;
use crate::session::{forget_match, CookieSessionStore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Checkbox; present only when ticked
    pub remember: Option<String>,
}

/// Login form, or straight to Home with a valid session
pub async fn login_form(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let store = CookieSessionStore::new(jar, &state.sessions);
    if store.get_session().is_some() {
        return Redirect::to("/").into_response();
    }
    Html(layout::login_page(None)).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let username = form.username.trim();
    if !state.sessions.users.verify(username, &form.password) {
        warn!(user = %username, "Failed login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Html(layout::login_page(Some("Invalid username or password"))),
        )
            .into_response();
    }

    let remember = form.remember.is_some();
    let mut store = CookieSessionStore::new(jar, &state.sessions).remember(remember);
    store.set_session(SessionData::new(username));
    info!(user = %username, remember, "User logged in");

    (store.into_jar(), Redirect::to("/")).into_response()
}

pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let mut store = CookieSessionStore::new(jar, &state.sessions);
    if let Some(session) = store.get_session() {
        info!(user = %session.username, "User logged out");
    }
    store.clear_session();
    let jar = forget_match(store.into_jar());
    (jar, Redirect::to("/login")).into_response()
}
