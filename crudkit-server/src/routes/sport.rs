//! Sport endpoints

use axum::{extract::State, routing::get, Json, Router};
use crudkit_core::{Created, Page, Table};

use crate::error::ApiError;
use crate::extractors::{Pagination, ValidJson};
use crate::models::{Sport, SportCreate, SportTable};
use crate::state::AppState;

/// GET /sport - one page of sports (`page` is zero-indexed, `limit` max 50)
async fn list_sports(
    State(state): State<AppState>,
    Pagination(request): Pagination,
) -> Result<Json<Page<Sport>>, ApiError> {
    let page = state
        .crud()
        .index(request, &SportTable::descriptor())
        .await?;
    Ok(Json(page))
}

/// POST /sport - create a sport
async fn create_sport(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SportCreate>,
) -> Result<Json<Created>, ApiError> {
    let created = state
        .crud()
        .create(&body, &SportTable::descriptor())
        .await?;
    tracing::info!(id = ?created.id, "sport created");
    Ok(Json(created))
}

/// Sport routes
pub fn router() -> Router<AppState> {
    Router::new().route("/sport", get(list_sports).post(create_sport))
}
