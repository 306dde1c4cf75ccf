//! Application state shared across handlers

use std::sync::Arc;

use crudkit_core::{Crud, Database};
use serde::Serialize;

/// What `GET /info` reports
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            title: "crudkit API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: env!("CARGO_PKG_DESCRIPTION").to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    crud: Crud,
    info: ServiceInfo,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self::with_info(db, ServiceInfo::default())
    }

    pub fn with_info(db: Database, info: ServiceInfo) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                crud: Crud::new(db),
                info,
            }),
        }
    }

    pub fn crud(&self) -> &Crud {
        &self.inner.crud
    }

    pub fn db(&self) -> &Database {
        self.inner.crud.database()
    }

    pub fn info(&self) -> &ServiceInfo {
        &self.inner.info
    }
}
