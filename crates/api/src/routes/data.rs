//! Collection read and mutation handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use courtside_core::{Collection, Record};

use crate::auth::RequireToken;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Query parameters for `GET /api/data`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    collection: Option<String>,
}

/// Body of `POST /api/data`.
#[derive(Debug, Deserialize)]
pub struct DataCommand {
    #[serde(rename = "type")]
    collection: Option<String>,
    action: Option<String>,
    data: Option<Value>,
    id: Option<String>,
}

#[derive(Serialize)]
struct ItemResponse {
    success: bool,
    item: Record,
}

#[derive(Serialize)]
struct Ack {
    success: bool,
}

fn parse_collection(raw: Option<&str>, verbose: bool) -> Result<Collection> {
    let message = if verbose {
        "Invalid type. Use: events, programs, posts, announcements, products"
    } else {
        "Invalid type"
    };
    raw.unwrap_or_default()
        .parse()
        .map_err(|_| ApiError::BadRequest(message.to_string()))
}

fn object_fields(data: Value) -> Result<Map<String, Value>> {
    match data {
        Value::Object(fields) => Ok(fields),
        _ => Err(ApiError::BadRequest("Data must be an object".to_string())),
    }
}

/// `GET /api/data?type=<collection>` - the full stored list, unfiltered.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Record>>> {
    let collection = parse_collection(query.collection.as_deref(), true)?;
    let records = state.store().get_all(collection).await?;
    Ok(Json(records))
}

/// `POST /api/data` - create, update, delete, or bulk-save records.
///
/// Requires a valid bearer token; the token check runs before the body
/// is parsed.
#[instrument(skip(state, _auth, payload))]
pub async fn mutate(
    State(state): State<AppState>,
    _auth: RequireToken,
    payload: std::result::Result<Json<DataCommand>, JsonRejection>,
) -> Result<Response> {
    let Json(command) = payload
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    let collection = parse_collection(command.collection.as_deref(), false)?;
    let store = state.store();

    match command.action.as_deref() {
        Some("create") => {
            let data = command
                .data
                .ok_or_else(|| ApiError::BadRequest("Missing data".to_string()))?;
            let item = store.create(collection, object_fields(data)?).await?;
            tracing::info!(collection = %collection, id = ?item.id(), "Record created");
            Ok(Json(ItemResponse {
                success: true,
                item,
            })
            .into_response())
        }

        Some("update") => {
            let (id, data) = match (command.id.as_deref(), command.data) {
                (Some(id), Some(data)) if !id.is_empty() => (id.to_string(), data),
                _ => {
                    return Err(ApiError::BadRequest("Missing id or data".to_string()));
                }
            };
            let item = store
                .update(collection, &id, object_fields(data)?)
                .await?;
            tracing::info!(collection = %collection, id = %id, "Record updated");
            Ok(Json(ItemResponse {
                success: true,
                item,
            })
            .into_response())
        }

        Some("delete") => {
            let id = command
                .id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ApiError::BadRequest("Missing id".to_string()))?;
            if !store.delete(collection, &id).await? {
                return Err(ApiError::Store(crate::store::StoreError::NotFound));
            }
            tracing::info!(collection = %collection, id = %id, "Record deleted");
            Ok(Json(Ack { success: true }).into_response())
        }

        Some("save") => {
            // Bulk save - replace entire collection
            let records: Vec<Record> = command
                .data
                .and_then(|data| serde_json::from_value(data).ok())
                .ok_or_else(|| ApiError::BadRequest("Data must be an array".to_string()))?;
            let count = records.len();
            store.replace(collection, records).await?;
            tracing::info!(collection = %collection, count, "Collection replaced");
            Ok(Json(Ack { success: true }).into_response())
        }

        _ => Err(ApiError::BadRequest(
            "Invalid action. Use: create, update, delete, save".to_string(),
        )),
    }
}
