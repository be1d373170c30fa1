use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Browsers may keep flags as long as the server cache does
const FLAG_CACHE_CONTROL: &str = "private, max-age=86400";

/// Flag image for a FIFA country code, served from the flag cache.
/// Unavailable flags are a plain 404 so pages simply miss the image.
pub async fn flag(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match state.data.flag_image(&code).await {
        Some(image) => (
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, FLAG_CACHE_CONTROL.to_string()),
            ],
            image.bytes,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
