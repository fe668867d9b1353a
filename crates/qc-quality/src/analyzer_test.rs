use super::*;
use qc_core::family::FieldSpec;
use qc_db::DuckDbBackend;

fn test_family() -> RecordFamily {
    RecordFamily {
        name: "order_item".to_string(),
        child_table: "emr_back.emr_order_item".to_string(),
        parent_table: "emr_back.emr_order".to_string(),
        join_column: "order_id".to_string(),
        parent_key: "id".to_string(),
        required_fields: vec![FieldSpec::text("drug_code"), FieldSpec::text("drug_name")],
        recommended_fields: vec![FieldSpec::text("drug_specifications")],
        parent_display_name: "order prescription".to_string(),
    }
}

async fn fixture() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(
        "CREATE SCHEMA emr_back;
         CREATE TABLE emr_back.emr_order (id VARCHAR, org_name VARCHAR);
         CREATE TABLE emr_back.emr_order_item (
             id VARCHAR,
             order_id VARCHAR,
             drug_code VARCHAR,
             drug_name VARCHAR,
             drug_specifications VARCHAR
         );",
    )
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn test_field_rate_with_partial_nulls() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order VALUES ('o1', 'Alpha');
         INSERT INTO emr_back.emr_order_item
         SELECT 'i' || n::VARCHAR, 'o1', 'C' || n::VARCHAR,
                CASE WHEN n < 10 THEN NULL ELSE 'drug' || n::VARCHAR END,
                'spec'
         FROM range(100) t(n);",
    )
    .await
    .unwrap();

    let rates = field_null_rates(&db, &test_family(), FieldGroup::Required)
        .await
        .unwrap();
    // 10 of 100 drug_name values are null.
    assert_eq!(rates[0], FieldRate { field: "drug_code".to_string(), rate: 100.0 });
    assert_eq!(rates[1], FieldRate { field: "drug_name".to_string(), rate: 90.0 });
}

#[tokio::test]
async fn test_blank_text_counts_as_missing() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order_item VALUES
             ('i1', 'o1', 'C1', NULL, 's'),
             ('i2', 'o1', 'C2', '   ', 's'),
             ('i3', 'o1', 'C3', 'aspirin', 's'),
             ('i4', 'o1', 'C4', 'ibuprofen', 's');",
    )
    .await
    .unwrap();

    let rates = field_null_rates(&db, &test_family(), FieldGroup::Required)
        .await
        .unwrap();
    let drug_name = rates.iter().find(|r| r.field == "drug_name").unwrap();
    assert_eq!(drug_name.rate, 50.0);
}

#[tokio::test]
async fn test_fully_null_field_rate_is_zero() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order_item
         SELECT 'i' || n::VARCHAR, 'o1', 'C' || n::VARCHAR, NULL, 's' FROM range(5) t(n);",
    )
    .await
    .unwrap();

    let rates = field_null_rates(&db, &test_family(), FieldGroup::Required)
        .await
        .unwrap();
    let drug_name = rates.iter().find(|r| r.field == "drug_name").unwrap();
    assert_eq!(drug_name.rate, 0.0);
    assert!(rates.iter().all(|r| (0.0..=100.0).contains(&r.rate)));
}

#[tokio::test]
async fn test_empty_child_table_is_explicit_no_data() {
    let db = fixture().await;
    let err = field_null_rates(&db, &test_family(), FieldGroup::Required)
        .await
        .unwrap_err();
    assert!(matches!(err, QualityError::NoData { .. }));

    let err = run_report(&db, &test_family(), &ReportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, QualityError::NoData { .. }));
}

#[tokio::test]
async fn test_empty_field_group_rejected() {
    let db = fixture().await;
    db.execute_batch("INSERT INTO emr_back.emr_order_item VALUES ('i1', 'o1', 'C', 'd', 's');")
        .await
        .unwrap();

    let mut family = test_family();
    family.recommended_fields.clear();
    let err = field_null_rates(&db, &family, FieldGroup::Recommended)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QualityError::EmptyFieldSet {
            group: FieldGroup::Recommended
        }
    ));
}

#[tokio::test]
async fn test_parent_child_gaps_scenario() {
    let db = fixture().await;
    // 5 parents; children reference 3 of them; 2 children reference a
    // nonexistent parent id.
    db.execute_batch(
        "INSERT INTO emr_back.emr_order
         SELECT 'p' || n::VARCHAR, 'Alpha' FROM range(1, 6) t(n);
         INSERT INTO emr_back.emr_order_item VALUES
             ('c1', 'p1', 'C', 'd', 's'),
             ('c2', 'p2', 'C', 'd', 's'),
             ('c3', 'p3', 'C', 'd', 's'),
             ('c4', 'p3', 'C', 'd', 's'),
             ('x1', 'p9', 'C', 'd', 's'),
             ('x2', 'p9', 'C', 'd', 's');",
    )
    .await
    .unwrap();

    let family = test_family();
    let links = parent_child_gaps(&db, &family).await.unwrap();
    assert_eq!(links.parents_with_children, 3);
    assert_eq!(links.parents_without_children, 2);
    assert_eq!(links.valid_children, 4);
    assert_eq!(links.orphaned_children, 2);

    // Partition invariants against independently counted totals.
    let parents = db
        .query("SELECT COUNT(*) AS n FROM emr_back.emr_order", &[])
        .await
        .unwrap();
    let total_parents = parents.get(0, "n").and_then(qc_db::Value::as_u64).unwrap();
    assert_eq!(
        links.parents_with_children + links.parents_without_children,
        total_parents
    );
    let total_children = total_child_records(&db, &family).await.unwrap();
    assert_eq!(links.valid_children + links.orphaned_children, total_children);
}

#[tokio::test]
async fn test_by_organization_sorted_by_completeness() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order VALUES ('o1', 'Alpha'), ('o2', 'Beta');
         INSERT INTO emr_back.emr_order_item VALUES
             ('a1', 'o1', 'C', 'd', 's'),
             ('a2', 'o1', 'C', 'd', 's'),
             ('b1', 'o2', 'C', NULL, 's'),
             ('b2', 'o2', 'C', 'd', 's');",
    )
    .await
    .unwrap();

    let rows = by_organization(&db, &test_family(), "org_name", FieldGroup::Required)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    // Alpha is fully populated; Beta is missing 1 of 4 required cells.
    assert_eq!(rows[0].organization, "Alpha");
    assert_eq!(rows[0].completeness, 100.0);
    assert_eq!(rows[1].organization, "Beta");
    assert_eq!(rows[1].completeness, 75.0);
    assert_eq!(rows[1].record_count, 2);

    let beta_drug_name = rows[1]
        .field_stats
        .iter()
        .find(|s| s.field == "drug_name")
        .unwrap();
    assert_eq!(beta_drug_name.missing_count, 1);
    assert_eq!(beta_drug_name.missing_rate, 50.0);
}

#[tokio::test]
async fn test_by_organization_keeps_fractional_rates() {
    let db = fixture().await;
    // 1 missing drug_name of 3 rows: rates land on .33, not whole numbers.
    db.execute_batch(
        "INSERT INTO emr_back.emr_order VALUES ('o1', 'Alpha');
         INSERT INTO emr_back.emr_order_item VALUES
             ('a1', 'o1', 'C', NULL, 's'),
             ('a2', 'o1', 'C', 'd', 's'),
             ('a3', 'o1', 'C', 'd', 's');",
    )
    .await
    .unwrap();

    let rows = by_organization(&db, &test_family(), "org_name", FieldGroup::Required)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let drug_name = rows[0]
        .field_stats
        .iter()
        .find(|s| s.field == "drug_name")
        .unwrap();
    assert_eq!(drug_name.missing_count, 1);
    assert_eq!(drug_name.missing_rate, 33.33);
    // 1 missing cell of 6 (3 rows x 2 required fields).
    assert_eq!(rows[0].completeness, 83.33);
}

#[tokio::test]
async fn test_by_organization_ties_break_on_record_count() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order VALUES ('o1', 'Alpha'), ('o2', 'Beta');
         INSERT INTO emr_back.emr_order_item VALUES
             ('a1', 'o1', 'C', 'd', 's'),
             ('b1', 'o2', 'C', 'd', 's'),
             ('b2', 'o2', 'C', 'd', 's'),
             ('b3', 'o2', 'C', 'd', 's');",
    )
    .await
    .unwrap();

    let rows = by_organization(&db, &test_family(), "org_name", FieldGroup::Required)
        .await
        .unwrap();
    assert_eq!(rows[0].completeness, rows[1].completeness);
    // Equal completeness: the larger organization sorts first.
    assert_eq!(rows[0].organization, "Beta");
    assert_eq!(rows[0].record_count, 3);
}

#[tokio::test]
async fn test_orphaned_rows_listing() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order VALUES ('o1', 'Alpha');
         INSERT INTO emr_back.emr_order_item VALUES
             ('c1', 'o1', 'C', 'd', 's'),
             ('x1', 'gone', 'C', 'd', 's'),
             ('x2', 'gone', 'C', 'd', 's'),
             ('x3', 'gone', 'C', 'd', 's');",
    )
    .await
    .unwrap();

    let family = test_family();
    let all = orphaned_rows(&db, &family, 1000).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.columns.iter().any(|c| c == "drug_name"));

    let capped = orphaned_rows(&db, &family, 2).await.unwrap();
    assert_eq!(capped.len(), 2);
}

#[tokio::test]
async fn test_rows_missing_field() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order_item VALUES
             ('i1', 'o1', 'C', NULL, 's'),
             ('i2', 'o1', 'C', 'd', 's');",
    )
    .await
    .unwrap();

    let family = test_family();
    let rows = rows_missing_field(&db, &family, "drug_name", 100).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows.get(0, "id"),
        Some(&qc_db::Value::Text("i1".to_string()))
    );

    let err = rows_missing_field(&db, &family, "not_configured", 100)
        .await
        .unwrap_err();
    assert!(matches!(err, QualityError::UnknownField { .. }));
}

#[tokio::test]
async fn test_run_report_assembles_all_sections() {
    let db = fixture().await;
    db.execute_batch(
        "INSERT INTO emr_back.emr_order VALUES ('o1', 'Alpha'), ('o2', 'Beta');
         INSERT INTO emr_back.emr_order_item VALUES
             ('c1', 'o1', 'C1', 'd1', NULL),
             ('c2', 'o1', 'C2', 'd2', 'spec'),
             ('c3', 'o2', 'C3', NULL, 'spec'),
             ('x1', 'gone', 'C4', 'd4', 'spec');",
    )
    .await
    .unwrap();

    let options = ReportOptions {
        required_weight: 0.7,
        org_column: Some("org_name".to_string()),
        org_group: FieldGroup::Required,
    };
    let report = run_report(&db, &test_family(), &options).await.unwrap();

    assert_eq!(report.family, "order_item");
    assert_eq!(report.total_child_records, 4);
    assert_eq!(report.links.parents_with_children, 2);
    assert_eq!(report.links.parents_without_children, 0);
    assert_eq!(report.links.valid_children, 3);
    assert_eq!(report.links.orphaned_children, 1);

    // drug_code fully populated, drug_name 3/4, drug_specifications 3/4.
    assert_eq!(report.required_avg, 87.5);
    assert_eq!(report.recommended_avg, Some(75.0));
    // 0.7 * 87.5 + 0.3 * 75.0
    assert_eq!(report.composite_score, Some(83.75));
    assert_eq!(report.by_organization.len(), 2);
}

#[tokio::test]
async fn test_run_report_without_recommended_fields() {
    let db = fixture().await;
    db.execute_batch("INSERT INTO emr_back.emr_order_item VALUES ('i1', 'o1', 'C', 'd', 's');")
        .await
        .unwrap();

    let mut family = test_family();
    family.recommended_fields.clear();
    let options = ReportOptions::default();
    let report = run_report(&db, &family, &options).await.unwrap();

    assert!(report.recommended_rates.is_empty());
    assert_eq!(report.recommended_avg, None);
    // The blend is undefined without recommended rates, never silently 0.
    assert_eq!(report.composite_score, None);
    assert!(report.by_organization.is_empty());
}
