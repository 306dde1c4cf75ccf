//! End-to-end engine behavior against an in-memory sport table

use crudkit_core::{
    Created, Crud, Database, DbConfig, Id, Page, PageRequest, PoolStatus, Table,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

struct SportTable;

impl Table for SportTable {
    const NAME: &'static str = "sport";
    const READ_COLUMNS: &'static [&'static str] = &["sportId", "category"];
    const PRIMARY_KEY: &'static str = "sportId";
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Sport {
    sport_id: i64,
    category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SportCreate<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    sport_id: Option<i64>,
    category: &'a str,
}

async fn setup() -> (Database, Crud) {
    let db = Database::new(DbConfig::in_memory());
    db.execute_script(
        "CREATE TABLE sport (
            sportId INTEGER PRIMARY KEY AUTOINCREMENT,
            category VARCHAR(255)
        );",
    )
    .await
    .unwrap();
    let crud = Crud::new(db.clone());
    (db, crud)
}

#[tokio::test]
async fn create_conflict_then_index() {
    let (db, crud) = setup().await;
    let table = SportTable::descriptor();

    let created = crud
        .create(&SportCreate { sport_id: None, category: "FootBall" }, &table)
        .await
        .unwrap();
    assert_eq!(created, Created { id: Id::Int(1) });

    let err = crud
        .create(&SportCreate { sport_id: Some(1), category: "Football" }, &table)
        .await
        .unwrap_err();
    let body = serde_json::to_value(err.to_structured()).unwrap();
    assert_eq!(body["code"], 400);
    assert_eq!(body["structured"], "validation/failed");

    let page: Page<Sport> = crud.index(PageRequest::default(), &table).await.unwrap();
    assert_eq!(
        page,
        Page {
            total: 1,
            data: vec![Sport { sport_id: 1, category: Some("FootBall".into()) }],
        }
    );

    let rows = crud.index_rows(PageRequest::default(), &table).await.unwrap();
    assert_eq!(
        serde_json::to_value(&rows).unwrap(),
        json!({"total": 1, "data": [{"sportId": 1, "category": "FootBall"}]})
    );

    db.close().await;
    assert_eq!(db.status().await, PoolStatus::Closed);
}

#[tokio::test]
async fn teardown_then_fail_fast() {
    let (db, crud) = setup().await;
    db.close().await;

    let err = crud
        .index_rows(PageRequest::default(), &SportTable::descriptor())
        .await
        .unwrap_err();
    let structured = err.to_structured();
    assert_eq!(structured.code, 503);
    assert_eq!(structured.structured, "server/connection-failed");
}
