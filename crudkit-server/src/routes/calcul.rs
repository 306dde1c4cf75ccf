//! Calcul endpoint

use axum::{routing::post, Json, Router};

use crate::error::ApiError;
use crate::extractors::ValidJson;
use crate::models::{Calcul, CalculRequest, CalculResponse};

/// POST /calcul - multiply `nb1` by `nb2`
async fn calcul(ValidJson(req): ValidJson<CalculRequest>) -> Result<Json<CalculResponse>, ApiError> {
    let result = Calcul::from(req).product();
    if !result.is_finite() {
        return Err(ApiError::bad_request(
            "calcul/overflow",
            "result is not a finite number",
        ));
    }
    Ok(Json(CalculResponse { result }))
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/calcul", post(calcul))
}
