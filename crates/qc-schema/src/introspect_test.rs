use super::*;
use qc_db::DuckDbBackend;

async fn fixture() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE SCHEMA emr_back;
         CREATE TABLE emr_back.emr_order (
             id VARCHAR PRIMARY KEY,
             org_name VARCHAR,
             operation_time TIMESTAMP
         );
         CREATE TABLE emr_back.emr_order_item (
             id VARCHAR PRIMARY KEY,
             order_id VARCHAR REFERENCES emr_back.emr_order (id),
             drug_code VARCHAR,
             drug_name VARCHAR
         );
         COMMENT ON TABLE emr_back.emr_order IS 'order prescriptions';
         COMMENT ON COLUMN emr_back.emr_order_item.drug_name IS 'drug display name';",
    )
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn test_lists_tables_sorted() {
    let db = fixture().await;
    let meta = describe_schema(&db, "emr_back").await.unwrap();

    assert_eq!(meta.schema_name, "emr_back");
    let names: Vec<&String> = meta.tables.keys().collect();
    assert_eq!(names, vec!["emr_order", "emr_order_item"]);
}

#[tokio::test]
async fn test_columns_ordered_by_ordinal_position() {
    let db = fixture().await;
    let meta = describe_schema(&db, "emr_back").await.unwrap();

    let item = &meta.tables["emr_order_item"];
    let column_names: Vec<&str> = item.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(column_names, vec!["id", "order_id", "drug_code", "drug_name"]);
}

#[tokio::test]
async fn test_column_count_matches_listed_columns() {
    let db = fixture().await;
    let meta = describe_schema(&db, "emr_back").await.unwrap();

    for table in meta.tables.values() {
        assert_eq!(table.column_count as usize, table.columns.len());
    }
}

#[tokio::test]
async fn test_primary_and_foreign_keys() {
    let db = fixture().await;
    let meta = describe_schema(&db, "emr_back").await.unwrap();

    let item = &meta.tables["emr_order_item"];
    assert_eq!(item.primary_keys, vec!["id"]);
    assert_eq!(
        item.foreign_keys,
        vec![ForeignKeyRef {
            local_column: "order_id".to_string(),
            foreign_table: "emr_order".to_string(),
            foreign_column: "id".to_string(),
        }]
    );

    let parent = &meta.tables["emr_order"];
    assert!(parent.foreign_keys.is_empty());
}

#[tokio::test]
async fn test_descriptions_and_nullability() {
    let db = fixture().await;
    let meta = describe_schema(&db, "emr_back").await.unwrap();

    let parent = &meta.tables["emr_order"];
    assert_eq!(parent.description.as_deref(), Some("order prescriptions"));

    let item = &meta.tables["emr_order_item"];
    let drug_name = item.columns.iter().find(|c| c.name == "drug_name").unwrap();
    assert_eq!(drug_name.description.as_deref(), Some("drug display name"));
    assert!(drug_name.nullable);

    let id = item.columns.iter().find(|c| c.name == "id").unwrap();
    assert!(!id.nullable);
}

#[tokio::test]
async fn test_empty_schema_is_empty_result() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE SCHEMA bare;").await.unwrap();

    let meta = describe_schema(&db, "bare").await.unwrap();
    assert_eq!(meta.schema_name, "bare");
    assert!(meta.tables.is_empty());
}

#[tokio::test]
async fn test_absent_schema_is_empty_result_not_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let meta = describe_schema(&db, "no_such_schema").await.unwrap();
    assert!(meta.tables.is_empty());
}

#[tokio::test]
async fn test_document_serializes_to_json() {
    let db = fixture().await;
    let meta = describe_schema(&db, "emr_back").await.unwrap();

    let json = serde_json::to_string_pretty(&meta).unwrap();
    assert!(json.contains("\"schema_name\": \"emr_back\""));
    assert!(json.contains("\"emr_order_item\""));
    assert!(json.contains("\"primary_keys\""));
}
