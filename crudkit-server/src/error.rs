//! API error types with IntoResponse
//!
//! Every failure leaves the server as `{ code, structured, message }` with
//! the HTTP status equal to `code`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use crudkit_core::{CrudError, DbError, StructuredError};

/// Handler error
#[derive(Debug)]
pub enum ApiError {
    /// Engine failure, rendered through its structured form
    Crud(CrudError),

    /// Already-structured error (e.g. request validation in a handler)
    Structured(StructuredError),
}

impl ApiError {
    pub fn bad_request(structured: &str, message: impl Into<String>) -> Self {
        Self::Structured(StructuredError {
            code: 400,
            structured: structured.to_string(),
            message: message.into(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::Crud(e) => {
                if e.is_client_error() {
                    tracing::debug!(error = %e, "request rejected");
                } else {
                    // Log the actual error, return the generic message
                    tracing::error!(error = %e, "request failed");
                }
                e.to_structured()
            }
            Self::Structured(s) => s,
        };

        let status =
            StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

impl From<CrudError> for ApiError {
    fn from(e: CrudError) -> Self {
        Self::Crud(e)
    }
}

/// Server startup and shutdown errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] DbError),
}
