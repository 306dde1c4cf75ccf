//! Custom Axum extractors
//!
//! Wrap the stock `Query`/`Json` extractors so a request that fails to parse
//! is answered with the same `{ code, structured, message }` body as every
//! other error.

use axum::extract::{FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::request::Parts;
use crudkit_core::error::tags;
use crudkit_core::{PageParams, PageRequest};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Clamped pagination from `?page=&limit=`
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PageRequest);

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<PageParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(tags::INVALID_REQUEST, rejection.body_text()))?;

        Ok(Self(params.into()))
    }
}

/// JSON body whose parse failures are structured errors
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(tags::INVALID_REQUEST, rejection.body_text()))?;

        Ok(Self(value))
    }
}
