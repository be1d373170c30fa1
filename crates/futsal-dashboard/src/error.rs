use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use futsal_core::FetchError;
use thiserror::Error;
use tracing::warn;

use crate::render::layout;

/// Failure while building a page. Rendered as a recoverable error page;
/// reloading the page retries.
#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::Fetch(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Page could not be built");
        let body = match &self {
            PageError::Fetch(e) => layout::error_page(
                "Could not load data from the FIFA API.",
                &format!("The request to {} failed. Reload the page to try again.", e.endpoint()),
            ),
        };
        (self.status(), Html(body)).into_response()
    }
}
