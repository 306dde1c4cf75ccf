//! Driver error classification
//!
//! The one place that knows what a uniqueness violation looks like for each
//! database engine.

/// Outcome of inspecting a driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Uniqueness or primary-key constraint violation
    Conflict,
    Other,
}

/// Constraint-violation codes reported by the supported engines.
///
/// - SQLite extended codes: `SQLITE_CONSTRAINT_PRIMARYKEY` (1555),
///   `SQLITE_CONSTRAINT_UNIQUE` (2067)
/// - PostgreSQL SQLSTATE `unique_violation` (23505)
/// - MySQL `ER_DUP_ENTRY` (1062)
const UNIQUE_VIOLATION_CODES: &[&str] = &["1555", "2067", "23505", "1062"];

pub fn classify(err: &sqlx::Error) -> Classification {
    match err {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db
                    .code()
                    .is_some_and(|code| UNIQUE_VIOLATION_CODES.iter().any(|c| code == *c)) =>
        {
            Classification::Conflict
        }
        _ => Classification::Other,
    }
}
