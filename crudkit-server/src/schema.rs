//! Schema bootstrap

use crudkit_core::{Database, DbError};

/// DDL for every table the server exposes
pub const SCHEMA: &str = include_str!("../schema.sql");

/// Create missing tables. Safe to run on every start.
pub async fn apply(db: &Database) -> Result<(), DbError> {
    db.execute_script(SCHEMA).await?;
    tracing::info!("Schema applied");
    Ok(())
}
