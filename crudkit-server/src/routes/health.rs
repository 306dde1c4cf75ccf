//! Liveness plus connection pool state

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use crudkit_core::PoolStatus;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: PoolStatus,
}

/// GET /health - 503 once the pool has been closed
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db().status().await;
    let (code, status) = match database {
        // An uninitialized pool opens on the next query
        PoolStatus::Active | PoolStatus::Uninitialized => (StatusCode::OK, "ok"),
        PoolStatus::Closed => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
    };
    (code, Json(HealthResponse { status, database }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
