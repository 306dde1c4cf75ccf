//! Conversion between [`Scalar`]/[`Row`] and sqlx SQLite types

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row as _, Sqlite, TypeInfo, ValueRef};

use crate::models::{Row, Scalar};

pub(crate) type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Bind parameters positionally.
pub(crate) fn bind_all<'q>(mut query: SqliteQuery<'q>, params: &[Scalar]) -> SqliteQuery<'q> {
    for param in params {
        query = match param {
            Scalar::Null => query.bind(None::<i64>),
            Scalar::Bool(b) => query.bind(*b),
            Scalar::Int(n) => query.bind(*n),
            Scalar::Float(f) => query.bind(*f),
            Scalar::Text(s) => query.bind(s.clone()),
        };
    }
    query
}

/// Decode a row by the storage class of each value.
pub(crate) fn decode_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    let mut out = Row::with_capacity(row.columns().len());

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Scalar::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Scalar::Int(row.try_get(index)?),
                "REAL" => Scalar::Float(row.try_get(index)?),
                "BLOB" => {
                    let bytes: Vec<u8> = row.try_get(index)?;
                    Scalar::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Scalar::Text(row.try_get(index)?),
            }
        };

        out.push(column.name(), value);
    }

    Ok(out)
}
