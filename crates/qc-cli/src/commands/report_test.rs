use super::*;
use qc_quality::{LinkStats, OrgCompletenessRow, OrgFieldStat};

fn sample_report(by_organization: Vec<OrgCompletenessRow>) -> CompletenessReport {
    CompletenessReport {
        family: "order_item".to_string(),
        generated_at: chrono::Utc::now(),
        total_child_records: 4,
        links: LinkStats {
            parents_with_children: 2,
            parents_without_children: 0,
            valid_children: 3,
            orphaned_children: 1,
        },
        required_rates: vec![
            FieldRate {
                field: "drug_code".to_string(),
                rate: 100.0,
            },
            FieldRate {
                field: "drug_name".to_string(),
                rate: 75.0,
            },
        ],
        recommended_rates: vec![FieldRate {
            field: "drug_specifications".to_string(),
            rate: 75.0,
        }],
        required_avg: 87.5,
        recommended_avg: Some(75.0),
        composite_score: Some(83.75),
        by_organization,
    }
}

#[test]
fn csv_flattens_per_organization_field_stats() {
    let report = sample_report(vec![OrgCompletenessRow {
        organization: "Alpha, Hospital".to_string(),
        record_count: 3,
        field_stats: vec![OrgFieldStat {
            field: "drug_code".to_string(),
            missing_count: 1,
            missing_rate: 33.33,
        }],
        completeness: 66.67,
    }]);

    let csv = reports_to_csv(&[report]);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "family,organization,record_count,field,missing_count,missing_rate,completeness"
    );
    assert_eq!(
        lines.next().unwrap(),
        "order_item,\"Alpha, Hospital\",3,drug_code,1,33.33,66.67"
    );
    assert!(lines.next().is_none());
}

#[test]
fn csv_falls_back_to_field_rates_without_organizations() {
    let csv = reports_to_csv(&[sample_report(Vec::new())]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "family,group,field,rate");
    assert_eq!(lines[1], "order_item,required,drug_code,100.00");
    assert_eq!(lines[2], "order_item,required,drug_name,75.00");
    assert_eq!(lines[3], "order_item,recommended,drug_specifications,75.00");
}

#[test]
fn csv_preserves_two_decimal_precision() {
    let csv = reports_to_csv(&[sample_report(Vec::new())]);
    assert!(csv.contains("100.00"));
    assert!(!csv.contains("100.0,"));
}
