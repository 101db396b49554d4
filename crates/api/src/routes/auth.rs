//! Login handler: exchanges the admin password for a session token.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Body of `POST /api/auth`.
#[derive(Deserialize)]
pub struct LoginRequest {
    password: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
}

/// `POST /api/auth {password}` - mint a session token.
///
/// The token is random, stored with a 24-hour expiry, and presented by
/// the dashboard as a bearer credential on every mutation.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(request) = payload
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    let password = request
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Password required".to_string()))?;

    if password != state.config().admin_password.expose_secret() {
        tracing::warn!("Login attempt with wrong password");
        return Err(ApiError::InvalidPassword);
    }

    let token = auth::issue_token(state.kv().as_ref()).await?;
    tracing::info!("Session token issued");
    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}
