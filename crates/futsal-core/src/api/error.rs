use thiserror::Error;

/// Failure of a single API request.
///
/// Every variant carries the endpoint that failed so the page can tell the
/// user what could not be loaded. Nothing retries automatically; reloading
/// the page issues the request again.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("network error requesting {endpoint}: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl FetchError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(endpoint: &str, status: reqwest::StatusCode, body: &str) -> Self {
        FetchError::Status {
            endpoint: endpoint.to_string(),
            status,
            body: Self::truncate_body(body),
        }
    }

    pub fn network(endpoint: &str, source: reqwest::Error) -> Self {
        FetchError::Network {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub fn invalid(endpoint: &str, reason: impl Into<String>) -> Self {
        FetchError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            FetchError::Status { endpoint, .. }
            | FetchError::Network { endpoint, .. }
            | FetchError::InvalidResponse { endpoint, .. } => endpoint,
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
