//! Session token issue and validation.
//!
//! Logging in with the admin password mints a random 32-byte hex token,
//! stored in the key-value backend under `auth_<token>` with a 24-hour
//! expiry. Mutating requests present the token as a bearer credential;
//! validation is a single storage read.

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use rand::RngCore;

use crate::error::ApiError;
use crate::kv::{KvError, KvStore};
use crate::state::AppState;

/// How long an issued session token stays valid.
pub const TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const TOKEN_BYTES: usize = 32;
const TOKEN_MARKER: &str = "valid";

fn token_key(token: &str) -> String {
    format!("auth_{token}")
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Mint and persist a fresh session token.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub async fn issue_token(kv: &dyn KvStore) -> Result<String, KvError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let token = encode_hex(&bytes);

    kv.put(&token_key(&token), TOKEN_MARKER.to_string(), Some(TOKEN_TTL))
        .await?;
    Ok(token)
}

/// Check whether a presented token is currently valid.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub async fn validate_token(kv: &dyn KvStore, token: &str) -> Result<bool, KvError> {
    let stored = kv.get(&token_key(token)).await?;
    Ok(stored.as_deref() == Some(TOKEN_MARKER))
}

/// Extractor that requires a valid bearer token.
///
/// Rejects with 401 when the `Authorization` header is missing, is not a
/// bearer credential, or carries a token the store does not recognize.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireToken) -> impl IntoResponse {
///     // only reached with a valid session token
/// }
/// ```
pub struct RequireToken;

impl FromRequestParts<AppState> for RequireToken {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        if validate_token(state.kv().as_ref(), token).await? {
            Ok(Self)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}
