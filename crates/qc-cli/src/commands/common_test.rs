use super::*;
use qc_db::Value;

fn default_config() -> Config {
    Config {
        name: "test".to_string(),
        database: Default::default(),
        report: Default::default(),
        families: Vec::new(),
    }
}

#[test]
fn resolve_families_defaults_to_all() {
    let config = default_config();
    let families = resolve_families(&config, None).unwrap();
    assert_eq!(families.len(), 3);
}

#[test]
fn resolve_families_filters_by_selector() {
    let config = default_config();
    let families = resolve_families(&config, Some("lab_item, order_item")).unwrap();
    let names: Vec<&str> = families.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["lab_item", "order_item"]);
}

#[test]
fn resolve_families_rejects_unknown_name() {
    let config = default_config();
    let err = resolve_families(&config, Some("nope")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Unknown family 'nope'"), "{msg}");
    assert!(msg.contains("order_item"), "{msg}");
}

#[test]
fn resolve_family_returns_single_match() {
    let config = default_config();
    let family = resolve_family(&config, "clinical_item").unwrap();
    assert_eq!(family.name, "clinical_item");
}

#[test]
fn csv_escape_quotes_only_when_needed() {
    assert_eq!(csv_escape("plain"), "plain");
    assert_eq!(csv_escape("a,b"), "\"a,b\"");
    assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
}

#[test]
fn csv_line_joins_and_terminates() {
    assert_eq!(csv_line(&["a", "b,c"]), "a,\"b,c\"\n");
}

#[test]
fn rows_to_csv_includes_header_and_nulls_as_empty() {
    let rows = Rows {
        columns: vec!["id".to_string(), "name".to_string()],
        rows: vec![
            vec![Value::Int(1), Value::Text("alpha".to_string())],
            vec![Value::Int(2), Value::Null],
        ],
    };
    assert_eq!(rows_to_csv(&rows), "id,name\n1,alpha\n2,\n");
}

#[test]
fn column_widths_cover_headers_and_cells() {
    let widths = calculate_column_widths(
        &["NAME", "N"],
        &[vec!["x".to_string(), "123456".to_string()]],
    );
    assert_eq!(widths, vec![4, 6]);
}
