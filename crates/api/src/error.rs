//! Unified error handling for the data API.
//!
//! Handler errors are converted into JSON `{"error": message}` responses
//! and never propagate past the HTTP boundary. Storage failures are
//! captured to Sentry (when configured) before the client sees a 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::kv::KvError;
use crate::store::StoreError;

/// Application-level error type for the data API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request shape: bad type, action, or payload.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid session token.
    #[error("Unauthorized")]
    Unauthorized,

    /// Wrong admin password on login.
    #[error("Invalid password")]
    InvalidPassword,

    /// Collection store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Storage backend failed outside the collection store.
    #[error(transparent)]
    Kv(#[from] KvError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Capture backend failures before masking them from the client
        if matches!(self, Self::Kv(_) | Self::Store(StoreError::Kv(_))) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Storage failure");
        }

        let (status, message) = match &self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            Self::InvalidPassword => (StatusCode::UNAUTHORIZED, "Invalid password".to_string()),
            Self::Store(StoreError::NotFound) => {
                (StatusCode::NOT_FOUND, "Item not found".to_string())
            }
            Self::Store(StoreError::Corrupt(_)) => {
                (StatusCode::BAD_REQUEST, "Malformed stored data".to_string())
            }
            Self::Store(StoreError::Kv(_)) | Self::Kv(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(ApiError::BadRequest("Invalid type".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ApiError::InvalidPassword),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(ApiError::Store(StoreError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::BadRequest("Missing data".to_string()).to_string(),
            "Missing data"
        );
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
    }
}
