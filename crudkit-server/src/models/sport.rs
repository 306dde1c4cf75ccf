//! The `sport` table

use crudkit_core::Table;
use serde::{Deserialize, Serialize};

/// A sport as listed by `GET /sport`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub sport_id: i64,
    pub category: Option<String>,
}

/// Body of `POST /sport`.
///
/// `sport_id` is normally left out and assigned by the database; callers
/// may supply it, in which case an existing id is a conflict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

pub struct SportTable;

impl Table for SportTable {
    const NAME: &'static str = "sport";
    const READ_COLUMNS: &'static [&'static str] = &["sportId", "category"];
    const PRIMARY_KEY: &'static str = "sportId";
}
