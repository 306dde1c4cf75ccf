//! Error taxonomy and the structured wire shape
//!
//! Pool failures are [`DbError`]. The engine wraps them into [`CrudError`],
//! which is what controllers see; every `CrudError` renders as a
//! [`StructuredError`] `{ code, structured, message }` so raw driver errors
//! never reach a client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{classify, Classification};
use crate::models::ValidationError;

/// Stable machine-readable error tags
pub mod tags {
    /// Uniqueness / primary-key conflict on create
    pub const VALIDATION_FAILED: &str = "validation/failed";
    /// Create payload is not a flat object of scalars with valid column names
    pub const INVALID_PAYLOAD: &str = "validation/invalid-payload";
    pub const CONNECTION_FAILED: &str = "server/connection-failed";
    pub const QUERY_FAILED: &str = "server/query-failed";
    pub const INVALID_TABLE: &str = "server/invalid-table";
    pub const DECODE_FAILED: &str = "server/decode-failed";
    /// Request could not be parsed (bad query string, malformed or mistyped JSON)
    pub const INVALID_REQUEST: &str = "validation/invalid-request";
}

/// Connection pool errors
#[derive(Debug, Error)]
pub enum DbError {
    /// No connection could be obtained (unreachable, exhausted, timed out)
    #[error("connection unavailable: {0}")]
    Connection(#[source] sqlx::Error),

    /// The pool has been closed; queries fail fast until it is reinitialized
    #[error("connection pool is closed")]
    Closed,

    /// Statement failed, including constraint violations
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("invalid database configuration: {0}")]
    Config(String),
}

impl DbError {
    /// Sort a driver error into connection vs. query failures.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => Self::Connection(err),
            other => Self::Query(other),
        }
    }

    pub fn classify(&self) -> Classification {
        match self {
            Self::Query(err) => classify(err),
            _ => Classification::Other,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Closed | Self::Config(_))
    }
}

/// CRUD engine errors
#[derive(Debug, Error)]
pub enum CrudError {
    /// A row with the same unique key already exists
    #[error("{table}: a row with the same unique key already exists")]
    Conflict { table: String },

    #[error("invalid payload: {0}")]
    InvalidPayload(ValidationError),

    /// Descriptor supplied by the controller is malformed
    #[error("invalid table descriptor: {0}")]
    InvalidTable(ValidationError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("failed to decode row from {table}: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("insert into {table} returned no identifier")]
    MissingId { table: String },

    #[error("row count for {table} could not be read")]
    MissingCount { table: String },
}

impl CrudError {
    /// HTTP-style status code.
    pub fn code(&self) -> u16 {
        match self {
            Self::Conflict { .. } | Self::InvalidPayload(_) => 400,
            Self::Database(e) if e.is_connection() => 503,
            Self::Database(_)
            | Self::InvalidTable(_)
            | Self::Decode { .. }
            | Self::MissingId { .. }
            | Self::MissingCount { .. } => 500,
        }
    }

    /// Machine-readable tag.
    pub fn structured(&self) -> &'static str {
        match self {
            Self::Conflict { .. } => tags::VALIDATION_FAILED,
            Self::InvalidPayload(_) => tags::INVALID_PAYLOAD,
            Self::Database(e) if e.is_connection() => tags::CONNECTION_FAILED,
            Self::Database(_) | Self::MissingId { .. } | Self::MissingCount { .. } => {
                tags::QUERY_FAILED
            }
            Self::InvalidTable(_) => tags::INVALID_TABLE,
            Self::Decode { .. } => tags::DECODE_FAILED,
        }
    }

    /// Client-facing message. Server-side failures get a generic text; the
    /// detail is only in the `Display` output meant for logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Conflict { .. } | Self::InvalidPayload(_) => self.to_string(),
            Self::Database(e) if e.is_connection() => "the database is unavailable".to_string(),
            Self::Database(_) => "the database rejected the query".to_string(),
            Self::InvalidTable(_)
            | Self::Decode { .. }
            | Self::MissingId { .. }
            | Self::MissingCount { .. } => {
                "an internal error occurred".to_string()
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.code() < 500
    }

    pub fn to_structured(&self) -> StructuredError {
        StructuredError {
            code: self.code(),
            structured: self.structured().to_string(),
            message: self.public_message(),
        }
    }
}

/// Wire shape every failure is reported in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: u16,
    pub structured: String,
    pub message: String,
}

impl From<&CrudError> for StructuredError {
    fn from(err: &CrudError) -> Self {
        err.to_structured()
    }
}

impl From<CrudError> for StructuredError {
    fn from(err: CrudError) -> Self {
        err.to_structured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_validation_failed() {
        let err = CrudError::Conflict {
            table: "sport".into(),
        };
        let s = err.to_structured();
        assert_eq!(s.code, 400);
        assert_eq!(s.structured, "validation/failed");
        assert_eq!(s.message, "sport: a row with the same unique key already exists");
    }

    #[test]
    fn invalid_payload_is_distinct_client_error() {
        let err = CrudError::InvalidPayload(ValidationError::NotAnObject);
        assert_eq!(err.code(), 400);
        assert_eq!(err.structured(), tags::INVALID_PAYLOAD);
        assert!(err.is_client_error());
    }

    #[test]
    fn connection_failures_are_503() {
        let err = CrudError::from(DbError::Closed);
        assert_eq!(err.code(), 503);
        assert_eq!(err.structured(), tags::CONNECTION_FAILED);

        let err = CrudError::from(DbError::from_sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.code(), 503);
    }

    #[test]
    fn query_failures_are_500_without_driver_detail() {
        let err = CrudError::from(DbError::from_sqlx(sqlx::Error::RowNotFound));
        let s = err.to_structured();
        assert_eq!(s.code, 500);
        assert_eq!(s.structured, "server/query-failed");
        assert!(!s.message.contains("no rows"));
    }

    #[test]
    fn structured_error_wire_shape() {
        let s = StructuredError {
            code: 400,
            structured: "validation/failed".into(),
            message: "dup".into(),
        };
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            serde_json::json!({"code": 400, "structured": "validation/failed", "message": "dup"})
        );
    }
}
