//! Database connection pool management
//!
//! A [`Database`] is a cheaply clonable handle around one sqlx `SqlitePool`
//! that moves through three states:
//!
//! ```text
//! Uninitialized --start/first query--> Active --close--> Closed --reinit--> Active
//! ```
//!
//! Every statement holds a read guard on the state for its whole duration;
//! [`Database::close`] takes the write guard, so it waits for in-flight
//! statements and new ones queue behind it, then fail fast with
//! [`DbError::Closed`].

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info};

use super::row::{bind_all, decode_row};
use crate::error::DbError;
use crate::models::{Row, Scalar};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a connection waits on a locked SQLite file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_DATABASE_URL: &str = "sqlite://crudkit.db";

/// Pool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// sqlx SQLite URL, e.g. `sqlite://data/app.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Private in-memory database, mostly for tests.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    /// Read `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `DATABASE_ACQUIRE_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, DbError> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let mut config = Self::new(url);

        if let Ok(raw) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            config.max_connections = raw.parse().map_err(|_| {
                DbError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))
            })?;
        }

        if let Ok(raw) = std::env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                DbError::Config(format!("DATABASE_ACQUIRE_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config.acquire_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Each connection to an in-memory database opens its own empty database.
    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new().acquire_timeout(self.acquire_timeout);

        if self.is_in_memory() {
            // Pin a single connection that never expires so every statement
            // sees the same database.
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options.max_connections(self.max_connections.max(1))
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

/// Lifecycle state as reported by [`Database::status`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    Uninitialized,
    Active,
    Closed,
}

enum PoolState {
    Uninitialized,
    Active(SqlitePool),
    Closed,
}

impl PoolState {
    fn status(&self) -> PoolStatus {
        match self {
            Self::Uninitialized => PoolStatus::Uninitialized,
            Self::Active(_) => PoolStatus::Active,
            Self::Closed => PoolStatus::Closed,
        }
    }
}

/// Shared, lazily created connection pool
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    config: DbConfig,
    state: RwLock<PoolState>,
}

impl Database {
    /// Create a handle without connecting; the pool opens on first use.
    pub fn new(config: DbConfig) -> Self {
        Self {
            inner: Arc::new(DatabaseInner {
                config,
                state: RwLock::new(PoolState::Uninitialized),
            }),
        }
    }

    /// Create a handle and open the pool immediately.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::connect(DbConfig::new("sqlite://data/app.db")).await?;
    /// ```
    pub async fn connect(config: DbConfig) -> Result<Self, DbError> {
        let db = Self::new(config);
        db.start().await?;
        Ok(db)
    }

    pub fn config(&self) -> &DbConfig {
        &self.inner.config
    }

    pub async fn status(&self) -> PoolStatus {
        self.inner.state.read().await.status()
    }

    /// Open the pool if it is uninitialized.
    ///
    /// A no-op when already active; fails with [`DbError::Closed`] after
    /// [`close`](Self::close).
    pub async fn start(&self) -> Result<(), DbError> {
        let mut state = self.inner.state.write().await;
        match *state {
            PoolState::Active(_) => Ok(()),
            PoolState::Closed => Err(DbError::Closed),
            PoolState::Uninitialized => {
                *state = PoolState::Active(open(&self.inner.config).await?);
                Ok(())
            }
        }
    }

    /// Drain and close all connections.
    ///
    /// Idempotent, and a no-op for a pool that was never opened.
    pub async fn close(&self) {
        let mut state = self.inner.state.write().await;
        match std::mem::replace(&mut *state, PoolState::Closed) {
            PoolState::Active(pool) => {
                pool.close().await;
                info!("Database pool closed");
            }
            PoolState::Uninitialized => {
                // Never opened: nothing to drain, stay reusable.
                *state = PoolState::Uninitialized;
            }
            PoolState::Closed => {}
        }
    }

    /// Leave the closed state and open a fresh pool.
    pub async fn reinit(&self) -> Result<(), DbError> {
        {
            let mut state = self.inner.state.write().await;
            if matches!(*state, PoolState::Closed) {
                *state = PoolState::Uninitialized;
            }
        }
        self.start().await
    }

    /// Run a parameterized statement and return every row.
    pub async fn query(&self, sql: &str, params: &[Scalar]) -> Result<Vec<Row>, DbError> {
        let pool = self.acquire().await?;
        let rows = bind_all(sqlx::query(sql), params)
            .fetch_all(&*pool)
            .await
            .map_err(DbError::from_sqlx)?;
        debug!(rows = rows.len(), "query");

        rows.iter()
            .map(|row| decode_row(row).map_err(DbError::Query))
            .collect()
    }

    /// Run a parameterized statement and return the number of affected rows.
    pub async fn execute(&self, sql: &str, params: &[Scalar]) -> Result<u64, DbError> {
        let pool = self.acquire().await?;
        let result = bind_all(sqlx::query(sql), params)
            .execute(&*pool)
            .await
            .map_err(DbError::from_sqlx)?;
        debug!(rows_affected = result.rows_affected(), "execute");
        Ok(result.rows_affected())
    }

    /// Run a multi-statement script (schema setup, resets). No parameters.
    pub async fn execute_script(&self, sql: &str) -> Result<(), DbError> {
        let pool = self.acquire().await?;
        sqlx::raw_sql(sql)
            .execute(&*pool)
            .await
            .map_err(DbError::from_sqlx)?;
        Ok(())
    }

    /// Read guard on the active pool, opening it on first use.
    async fn acquire(&self) -> Result<RwLockReadGuard<'_, SqlitePool>, DbError> {
        loop {
            let state = self.inner.state.read().await;
            let state = match RwLockReadGuard::try_map(state, |s| match s {
                PoolState::Active(pool) => Some(pool),
                _ => None,
            }) {
                Ok(pool) => return Ok(pool),
                Err(state) => state,
            };

            if matches!(*state, PoolState::Closed) {
                return Err(DbError::Closed);
            }
            drop(state);
            self.start().await?;
        }
    }
}

async fn open(config: &DbConfig) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DbError::Config(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = config
        .pool_options()
        .connect_with(options)
        .await
        .map_err(|e| match DbError::from_sqlx(e) {
            // Failing to open is a connection problem whatever the cause
            DbError::Query(e) => DbError::Connection(e),
            other => other,
        })?;

    info!(
        max_connections = config.max_connections,
        in_memory = config.is_in_memory(),
        "Database pool opened"
    );
    Ok(pool)
}
