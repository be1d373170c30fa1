//! HTTP routes of the dashboard.
//!
//! `/login` is public; every other route requires a session and redirects
//! to `/login` without one.

pub mod auth;
pub mod flags;
pub mod pages;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::SignedCookieJar;
use futsal_core::auth::SessionStore;
use tower_http::trace::TraceLayer;

use crate::session::CookieSessionStore;
use crate::state::AppState;

/// Username of the session, available to handlers behind `require_session`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

async fn require_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let store = CookieSessionStore::new(jar, &state.sessions);
    match store.get_session() {
        Some(session) => {
            request.extensions_mut().insert(CurrentUser(session.username));
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(pages::home))
        .route("/timeline", get(pages::timeline))
        .route("/statistics", get(pages::statistics))
        .route("/infographic", get(pages::infographic))
        .route("/flags/{code}", get(flags::flag))
        .route("/logout", post(auth::logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/login", get(auth::login_form).post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
