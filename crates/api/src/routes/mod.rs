//! HTTP route handlers for the data API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/data?type=<collection>  - Full record list for a collection
//! POST /api/data                    - Mutations {type, action, data?, id?}
//!                                     (bearer token required)
//! POST /api/auth                    - Exchange the admin password for a
//!                                     session token
//! POST /api/seed                    - Populate default content (first run)
//! ```
//!
//! All responses are JSON and carry permissive CORS headers so the
//! dashboard and public pages can call the API from any origin. `OPTIONS`
//! on any endpoint answers 204.

pub mod auth;
pub mod data;
pub mod seed;

use axum::http::{Method, StatusCode, header};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Plain `OPTIONS` response; the CORS layer attaches the headers.
async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/data",
            get(data::list).post(data::mutate).options(preflight),
        )
        .route("/api/auth", post(auth::login).options(preflight))
        .route("/api/seed", post(seed::seed).options(preflight))
        .layer(cors_layer())
}
