//! crudkit-server: HTTP front for the crudkit CRUD engine
//!
//! Routes are thin controllers: each one names its table, hands the request
//! to [`crudkit_core::Crud`] and forwards the result or structured error
//! unchanged.

pub mod error;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod schema;
pub mod server;
pub mod state;
pub mod tracing_setup;

pub use error::{ApiError, ServerError};
pub use server::{build_router, run_server, ServerConfig};
pub use state::{AppState, ServiceInfo};
