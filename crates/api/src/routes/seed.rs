//! First-run seeding handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::SeedOutcome;

#[derive(Serialize)]
struct SeedResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<Vec<String>>,
}

/// `POST /api/seed` - populate default content, only when the store is
/// empty. Safe to call repeatedly.
#[instrument(skip(state))]
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>> {
    let response = match state.store().seed().await? {
        SeedOutcome::AlreadySeeded => SeedResponse {
            success: true,
            message: "Data already seeded".to_string(),
            types: None,
        },
        SeedOutcome::Seeded(collections) => {
            tracing::info!(count = collections.len(), "Default content seeded");
            SeedResponse {
                success: true,
                message: "Default data seeded".to_string(),
                types: Some(collections.iter().map(ToString::to_string).collect()),
            }
        }
    };
    Ok(Json(response))
}
