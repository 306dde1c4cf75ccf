//! Database layer - connection pool lifecycle and statement execution
//!
//! # Design Principles
//!
//! - One pool per [`Database`] handle, created lazily, closed explicitly
//! - Close waits for in-flight statements before tearing connections down
//! - All values are bound as parameters; only validated identifiers are
//!   spliced into SQL text
//! - Conflict detection lives in [`classify`] and nowhere else

pub mod classify;
pub mod pool;
mod row;

pub use classify::{classify, Classification};
pub use pool::{Database, DbConfig, PoolStatus};
