//! Service description endpoint

use axum::{extract::State, routing::get, Json, Router};

use crate::state::{AppState, ServiceInfo};

/// GET /info
async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(state.info().clone())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/info", get(info))
}
