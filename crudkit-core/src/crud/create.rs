use serde::Serialize;
use tracing::{debug, warn};

use super::Crud;
use crate::db::Classification;
use crate::error::CrudError;
use crate::models::{Created, Id, Identifier, Payload, TableDescriptor};

impl Crud {
    /// Insert `payload` into `table` and return the new row's primary key.
    ///
    /// `payload` must serialize to a flat object of scalars. Leave the
    /// primary key out to let the database assign it; supplying one that
    /// already exists fails with `validation/failed` and leaves the table
    /// untouched.
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        table: &TableDescriptor,
    ) -> Result<Created, CrudError> {
        let payload = Payload::from_serialize(payload).map_err(CrudError::InvalidPayload)?;
        self.create_payload(payload, table).await
    }

    /// Insert an already-built [`Payload`].
    pub async fn create_payload(
        &self,
        payload: Payload,
        table: &TableDescriptor,
    ) -> Result<Created, CrudError> {
        let checked = table.check().map_err(CrudError::InvalidTable)?;
        let (columns, values) = payload.check().map_err(CrudError::InvalidPayload)?;

        let sql = insert_sql(&checked.name, &columns, &checked.primary_key);

        let rows = match self.db.query(&sql, &values).await {
            Ok(rows) => rows,
            Err(err) if err.classify() == Classification::Conflict => {
                warn!(table = %checked.name, "create rejected: unique key conflict");
                return Err(CrudError::Conflict {
                    table: table.name().to_owned(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        let id = rows
            .into_iter()
            .next()
            .and_then(|row| row.values().next().cloned())
            .and_then(Id::from_scalar)
            .ok_or_else(|| CrudError::MissingId {
                table: table.name().to_owned(),
            })?;

        debug!(table = %checked.name, id = ?id, "create");
        Ok(Created { id })
    }
}

/// `INSERT ... RETURNING <pk>`; with no columns every column takes its default.
fn insert_sql(table: &Identifier, columns: &[Identifier], primary_key: &Identifier) -> String {
    if columns.is_empty() {
        return format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            table.quoted(),
            primary_key.quoted()
        );
    }

    let column_list = columns
        .iter()
        .map(|c| c.quoted())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({column_list}) VALUES ({placeholders}) RETURNING {}",
        table.quoted(),
        primary_key.quoted(),
    )
}
