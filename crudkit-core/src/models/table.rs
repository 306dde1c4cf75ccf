//! Table descriptors
//!
//! A descriptor is all the engine knows about a table: its name, the columns
//! listing operations may return, and the primary key that orders pages and
//! identifies inserted rows.

use std::collections::HashSet;

use super::{Identifier, ValidationError};

/// Static table declaration implemented once per resource.
///
/// ```
/// use crudkit_core::Table;
///
/// struct SportTable;
///
/// impl Table for SportTable {
///     const NAME: &'static str = "sport";
///     const READ_COLUMNS: &'static [&'static str] = &["sportId", "category"];
///     const PRIMARY_KEY: &'static str = "sportId";
/// }
///
/// let descriptor = SportTable::descriptor();
/// assert_eq!(descriptor.name(), "sport");
/// assert_eq!(descriptor.primary_key(), "sportId");
/// ```
pub trait Table {
    const NAME: &'static str;
    const READ_COLUMNS: &'static [&'static str];
    const PRIMARY_KEY: &'static str;

    fn descriptor() -> TableDescriptor {
        TableDescriptor::new(Self::NAME, Self::READ_COLUMNS.iter().copied())
            .with_primary_key(Self::PRIMARY_KEY)
    }
}

/// Runtime description of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    name: String,
    read_columns: Vec<String>,
    primary_key: Option<String>,
}

/// Descriptor whose identifiers have all been validated
#[derive(Debug, Clone)]
pub(crate) struct CheckedTable {
    pub name: Identifier,
    pub read_columns: Vec<Identifier>,
    pub primary_key: Identifier,
}

impl TableDescriptor {
    /// Describe `name` with the given read-column whitelist.
    ///
    /// The primary key defaults to the first read column.
    pub fn new<I, S>(name: impl Into<String>, read_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            read_columns: read_columns.into_iter().map(Into::into).collect(),
            primary_key: None,
        }
    }

    pub fn with_primary_key(mut self, column: impl Into<String>) -> Self {
        self.primary_key = Some(column.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read_columns(&self) -> &[String] {
        &self.read_columns
    }

    pub fn primary_key(&self) -> &str {
        self.primary_key
            .as_deref()
            .or_else(|| self.read_columns.first().map(String::as_str))
            .unwrap_or_default()
    }

    /// Validate every identifier and the whitelist shape.
    pub(crate) fn check(&self) -> Result<CheckedTable, ValidationError> {
        let name = Identifier::new("table", &self.name)?;

        if self.read_columns.is_empty() {
            return Err(ValidationError::Empty {
                field: "read columns",
            });
        }

        let mut seen = HashSet::with_capacity(self.read_columns.len());
        let mut read_columns = Vec::with_capacity(self.read_columns.len());
        for column in &self.read_columns {
            if !seen.insert(column.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "read column",
                    value: column.clone(),
                });
            }
            read_columns.push(Identifier::new("read column", column)?);
        }

        let primary_key = Identifier::new("primary key", self.primary_key())?;

        Ok(CheckedTable {
            name,
            read_columns,
            primary_key,
        })
    }
}
