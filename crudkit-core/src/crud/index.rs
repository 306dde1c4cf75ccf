use serde::de::DeserializeOwned;
use tracing::debug;

use super::Crud;
use crate::error::CrudError;
use crate::models::{Page, PageRequest, Row, Scalar, TableDescriptor};

impl Crud {
    /// List one page of `table`, deserializing each row into `T`.
    ///
    /// `T` sees exactly the read columns, keyed by column name.
    pub async fn index<T: DeserializeOwned>(
        &self,
        request: PageRequest,
        table: &TableDescriptor,
    ) -> Result<Page<T>, CrudError> {
        self.index_rows(request, table)
            .await?
            .try_map(|row| serde_json::from_value(row.into_json()))
            .map_err(|source| CrudError::Decode {
                table: table.name().to_owned(),
                source,
            })
    }

    /// List one page of `table` as untyped rows.
    ///
    /// Rows are ordered by primary key ascending, so a page is stable for a
    /// fixed table state. A page past the end is empty, not an error.
    pub async fn index_rows(
        &self,
        request: PageRequest,
        table: &TableDescriptor,
    ) -> Result<Page<Row>, CrudError> {
        let table = table.check().map_err(CrudError::InvalidTable)?;
        let from = table.name.quoted();

        let count_sql = format!("SELECT COUNT(*) AS total FROM {from}");
        let counted = self.db.query(&count_sql, &[]).await?;
        let total = total_from(&counted, table.name.as_str())?;

        let columns = table
            .read_columns
            .iter()
            .map(|c| c.quoted())
            .collect::<Vec<_>>()
            .join(", ");
        let select_sql = format!(
            "SELECT {columns} FROM {from} ORDER BY {} ASC LIMIT ? OFFSET ?",
            table.primary_key.quoted()
        );
        let data = self
            .db
            .query(
                &select_sql,
                &[Scalar::Int(request.limit()), Scalar::Int(request.offset())],
            )
            .await?;

        debug!(
            table = %table.name,
            page = request.page(),
            limit = request.limit(),
            total,
            returned = data.len(),
            "index"
        );

        Ok(Page { total, data })
    }
}

/// Read the `total` column of a `COUNT(*)` result.
fn total_from(rows: &[Row], table: &str) -> Result<i64, CrudError> {
    rows.first()
        .and_then(|row| row.get("total"))
        .and_then(Scalar::as_i64)
        .ok_or_else(|| CrudError::MissingCount {
            table: table.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use crate::crud::test_support::{sport_crud, SportTable};
    use crate::error::{tags, CrudError};
    use crate::models::{PageRequest, Payload, Row, Scalar, Table, TableDescriptor};

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sport {
        sport_id: i64,
        category: Option<String>,
    }

    async fn seeded(n: i64) -> crate::Crud {
        let crud = sport_crud().await;
        for i in 0..n {
            let mut payload = Payload::new();
            payload.insert("category", format!("sport-{i}"));
            crud.create_payload(payload, &SportTable::descriptor())
                .await
                .unwrap();
        }
        crud
    }

    #[tokio::test]
    async fn empty_table() {
        let crud = sport_crud().await;
        let page = crud
            .index_rows(PageRequest::default(), &SportTable::descriptor())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn page_sizes_follow_total() {
        let total = 23;
        let crud = seeded(total).await;
        let table = SportTable::descriptor();

        for limit in [1, 5, 10, 23, 50] {
            for page in 0..6 {
                let result = crud
                    .index_rows(PageRequest::new(page, limit), &table)
                    .await
                    .unwrap();
                let expected = limit.min((total - page * limit).max(0));
                assert_eq!(result.total, total);
                assert_eq!(result.data.len() as i64, expected, "page={page} limit={limit}");
            }
        }
    }

    #[tokio::test]
    async fn page_past_end_is_empty_not_error() {
        let crud = seeded(3).await;
        let page = crud
            .index_rows(PageRequest::new(100, 10), &SportTable::descriptor())
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_requests_are_clamped() {
        let crud = seeded(60).await;
        let table = SportTable::descriptor();

        let page = crud.index_rows(PageRequest::new(-3, 500), &table).await.unwrap();
        assert_eq!(page.data.len(), 50);
        assert_eq!(page.data[0].get("sportId"), Some(&Scalar::Int(1)));

        let page = crud.index_rows(PageRequest::new(0, 0), &table).await.unwrap();
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn pages_are_ordered_by_primary_key() {
        let crud = seeded(7).await;
        let table = SportTable::descriptor();

        let mut ids = Vec::new();
        for page in 0..3 {
            let result = crud.index_rows(PageRequest::new(page, 3), &table).await.unwrap();
            ids.extend(result.data.iter().filter_map(|r| r.get("sportId")?.as_i64()));
        }
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn rows_contain_exactly_the_read_columns() {
        let crud = seeded(2).await;
        crud.database()
            .execute_script("ALTER TABLE sport ADD COLUMN secret TEXT DEFAULT 'hidden';")
            .await
            .unwrap();

        let page = crud
            .index_rows(PageRequest::default(), &SportTable::descriptor())
            .await
            .unwrap();
        for row in &page.data {
            assert_eq!(row.columns().collect::<Vec<_>>(), ["sportId", "category"]);
        }

        let only_category = TableDescriptor::new("sport", ["category"]).with_primary_key("sportId");
        let page = crud
            .index_rows(PageRequest::default(), &only_category)
            .await
            .unwrap();
        for row in &page.data {
            assert_eq!(row.columns().collect::<Vec<_>>(), ["category"]);
        }
    }

    #[tokio::test]
    async fn typed_index() {
        let crud = seeded(2).await;
        let page = crud
            .index::<Sport>(PageRequest::default(), &SportTable::descriptor())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(
            page.data[1],
            Sport {
                sport_id: 2,
                category: Some("sport-1".into())
            }
        );
    }

    #[tokio::test]
    async fn typed_index_mismatch_is_decode_error() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrong {
            missing: String,
        }

        let crud = seeded(1).await;
        let err = crud
            .index::<Wrong>(PageRequest::default(), &SportTable::descriptor())
            .await
            .unwrap_err();
        assert_eq!(err.structured(), tags::DECODE_FAILED);
    }

    #[test]
    fn undecodable_count_is_an_error_not_zero() {
        let mut text_total = Row::default();
        text_total.push("total", Scalar::Text("many".into()));

        for rows in [vec![], vec![Row::default()], vec![text_total]] {
            let err = super::total_from(&rows, "sport").unwrap_err();
            assert!(matches!(err, CrudError::MissingCount { .. }));
            assert_eq!(err.code(), 500);
            assert_eq!(err.structured(), tags::QUERY_FAILED);
        }

        let mut ok = Row::default();
        ok.push("total", Scalar::Int(4));
        assert_eq!(super::total_from(&[ok], "sport").unwrap(), 4);
    }

    #[tokio::test]
    async fn unknown_table_is_server_error() {
        let crud = sport_crud().await;
        let err = crud
            .index_rows(PageRequest::default(), &TableDescriptor::new("nope", ["id"]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 500);
        assert_eq!(err.structured(), tags::QUERY_FAILED);
    }

    #[tokio::test]
    async fn unknown_column_is_server_error() {
        let crud = seeded(1).await;
        let err = crud
            .index_rows(
                PageRequest::default(),
                &TableDescriptor::new("sport", ["sportId", "nickname"]),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), 500);
        assert_eq!(err.structured(), tags::QUERY_FAILED);
    }

    #[tokio::test]
    async fn malformed_descriptor_never_reaches_database() {
        let crud = sport_crud().await;
        let err = crud
            .index_rows(
                PageRequest::default(),
                &TableDescriptor::new("sport", ["sportId", "1=1; --"]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::InvalidTable(_)));
        assert_eq!(err.structured(), tags::INVALID_TABLE);
    }
}
