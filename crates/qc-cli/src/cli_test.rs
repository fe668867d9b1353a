use super::*;

#[test]
fn parses_report_with_defaults() {
    let cli = Cli::try_parse_from(["emrqc", "report"]).unwrap();
    let Commands::Report(args) = &cli.command else {
        panic!("expected report command");
    };
    assert!(args.family.is_none());
    assert_eq!(args.output, ReportOutput::Table);
    assert_eq!(args.org_group, OrgGroup::Required);
    assert!(!args.no_orgs);
    assert_eq!(cli.global.project_dir, ".");
}

#[test]
fn parses_report_family_selector_and_csv() {
    let cli = Cli::try_parse_from([
        "emrqc", "report", "--family", "order_item,lab_item", "--output", "csv",
    ])
    .unwrap();
    let Commands::Report(args) = &cli.command else {
        panic!("expected report command");
    };
    assert_eq!(args.family.as_deref(), Some("order_item,lab_item"));
    assert_eq!(args.output, ReportOutput::Csv);
}

#[test]
fn orphans_limit_defaults_to_1000() {
    let cli = Cli::try_parse_from(["emrqc", "orphans", "--family", "order_item"]).unwrap();
    let Commands::Orphans(args) = &cli.command else {
        panic!("expected orphans command");
    };
    assert_eq!(args.limit, 1000);
    assert_eq!(args.output, RowsOutput::Table);
}

#[test]
fn missing_requires_family_and_field() {
    assert!(Cli::try_parse_from(["emrqc", "missing", "--family", "order_item"]).is_err());
    let cli = Cli::try_parse_from([
        "emrqc", "missing", "--family", "order_item", "--field", "drug_code",
    ])
    .unwrap();
    let Commands::Missing(args) = &cli.command else {
        panic!("expected missing command");
    };
    assert_eq!(args.field, "drug_code");
}

#[test]
fn global_overrides_are_accepted_after_subcommand() {
    let cli = Cli::try_parse_from([
        "emrqc", "schema", "--verbose", "--database", "other.duckdb", "-p", "/tmp/project",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.database.as_deref(), Some("other.duckdb"));
    assert_eq!(cli.global.project_dir, "/tmp/project");
}
