//! Error types for the API client.

use thiserror::Error;

/// Error from a data API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connection, timeout, TLS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the session token or password.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with an error status and message.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Whether this error means the session token is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
