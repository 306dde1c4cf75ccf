//! Generic CRUD engine
//!
//! Table-agnostic list and insert:
//! - index: `COUNT(*)` plus a whitelisted, primary-key ordered page
//! - create: parameterized `INSERT ... RETURNING <pk>`, with unique-key
//!   conflicts re-tagged as `validation/failed`
//!
//! The engine holds no locks of its own; concurrent creates with the same
//! key are arbitrated by the database's unique constraint.

mod create;
mod index;

use crate::db::Database;

/// CRUD engine bound to one [`Database`]
#[derive(Clone)]
pub struct Crud {
    db: Database,
}

impl Crud {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
