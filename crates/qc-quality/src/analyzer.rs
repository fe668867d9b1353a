//! Analyzer operations.
//!
//! Each operation issues read-only aggregate queries through the
//! [`Database`] trait and derives percentages/scores in-process. No
//! ordering or mutual exclusion is imposed across callers; all operations
//! are idempotent reads.

use chrono::Utc;
use log::debug;
use qc_core::family::{FieldGroup, RecordFamily};
use qc_db::{Database, Rows, Value};

use crate::error::{QualityError, QualityResult};
use crate::report::{
    CompletenessReport, FieldRate, LinkStats, OrgCompletenessRow, OrgFieldStat,
};
use crate::score::{composite_score, mean, round2};
use crate::sql;

/// Report orchestration knobs, usually filled from `emrqc.yml`.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Weight of the required-field average in the composite score
    pub required_weight: f64,
    /// Parent-table organization column; None disables the breakdown
    pub org_column: Option<String>,
    /// Field group the per-organization completeness column is computed over
    pub org_group: FieldGroup,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            required_weight: 0.7,
            org_column: None,
            org_group: FieldGroup::Required,
        }
    }
}

/// Read the single count cell every count query aliases as `n`.
fn count_cell(rows: &Rows, column: &str) -> QualityResult<u64> {
    rows.get(0, column)
        .and_then(Value::as_u64)
        .ok_or_else(|| QualityError::MissingColumn {
            column: column.to_string(),
        })
}

/// Total row count of the family's child table.
pub async fn total_child_records(
    db: &dyn Database,
    family: &RecordFamily,
) -> QualityResult<u64> {
    let rows = db.query(&sql::total_count(family), &[]).await?;
    count_cell(&rows, "total")
}

/// Per-field completeness rates for one field group.
///
/// One aggregate query per group, not one per field. Fails with `NoData`
/// on an empty child table and `EmptyFieldSet` on an empty group.
pub async fn field_null_rates(
    db: &dyn Database,
    family: &RecordFamily,
    group: FieldGroup,
) -> QualityResult<Vec<FieldRate>> {
    let total = total_child_records(db, family).await?;
    if total == 0 {
        return Err(QualityError::NoData {
            table: family.child_table.clone(),
        });
    }
    rates_for_group(db, family, group, total).await
}

/// Rate computation against a known non-zero total.
async fn rates_for_group(
    db: &dyn Database,
    family: &RecordFamily,
    group: FieldGroup,
    total: u64,
) -> QualityResult<Vec<FieldRate>> {
    let fields = family.fields(group);
    if fields.is_empty() {
        return Err(QualityError::EmptyFieldSet { group });
    }

    debug!(
        "computing {group} field rates for family '{}' over {total} rows",
        family.name
    );
    let rows = db.query(&sql::missing_counts(family, group), &[]).await?;

    let mut rates = Vec::with_capacity(fields.len());
    for field in fields {
        let column = format!("{}_missing", field.name);
        let missing = count_cell(&rows, &column)?;
        let rate = round2(100.0 - 100.0 * missing as f64 / total as f64);
        rates.push(FieldRate {
            field: field.name.clone(),
            rate,
        });
    }
    Ok(rates)
}

/// Parent/child gap counts over the family join.
///
/// Four independent set-counting queries; see [`LinkStats`] for the
/// snapshot-consistency caveat.
pub async fn parent_child_gaps(
    db: &dyn Database,
    family: &RecordFamily,
) -> QualityResult<LinkStats> {
    let with = db.query(&sql::parents_with_children(family), &[]).await?;
    let without = db
        .query(&sql::parents_without_children(family), &[])
        .await?;
    let valid = db.query(&sql::valid_children(family), &[]).await?;
    let orphaned = db.query(&sql::orphaned_children(family), &[]).await?;

    Ok(LinkStats {
        parents_with_children: count_cell(&with, "n")?,
        parents_without_children: count_cell(&without, "n")?,
        valid_children: count_cell(&valid, "n")?,
        orphaned_children: count_cell(&orphaned, "n")?,
    })
}

/// Per-organization completeness breakdown.
///
/// Single grouped aggregate joining children to their parents; child rows
/// without a parent are not attributed to any organization. Results come
/// back ordered by completeness descending, record count descending.
pub async fn by_organization(
    db: &dyn Database,
    family: &RecordFamily,
    org_column: &str,
    group: FieldGroup,
) -> QualityResult<Vec<OrgCompletenessRow>> {
    let fields = family.fields(group);
    if fields.is_empty() {
        return Err(QualityError::EmptyFieldSet { group });
    }

    let rows = db
        .query(&sql::by_organization(family, org_column, group), &[])
        .await?;

    let mut result = Vec::with_capacity(rows.len());
    for i in 0..rows.len() {
        let organization = rows
            .get(i, "organization")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let record_count = rows
            .get(i, "record_count")
            .and_then(Value::as_u64)
            .ok_or_else(|| QualityError::MissingColumn {
                column: "record_count".to_string(),
            })?;

        let mut field_stats = Vec::with_capacity(fields.len());
        for field in fields {
            let missing_count = rows
                .get(i, &format!("{}_missing", field.name))
                .and_then(Value::as_u64)
                .ok_or_else(|| QualityError::MissingColumn {
                    column: format!("{}_missing", field.name),
                })?;
            let missing_rate = rows
                .get(i, &format!("{}_missing_rate", field.name))
                .and_then(Value::as_f64)
                .ok_or_else(|| QualityError::MissingColumn {
                    column: format!("{}_missing_rate", field.name),
                })?;
            field_stats.push(OrgFieldStat {
                field: field.name.clone(),
                missing_count,
                missing_rate,
            });
        }

        let completeness = rows
            .get(i, "completeness")
            .and_then(Value::as_f64)
            .ok_or_else(|| QualityError::MissingColumn {
                column: "completeness".to_string(),
            })?;

        result.push(OrgCompletenessRow {
            organization,
            record_count,
            field_stats,
            completeness,
        });
    }
    Ok(result)
}

/// Full child rows with no matching parent, capped at `limit`.
pub async fn orphaned_rows(
    db: &dyn Database,
    family: &RecordFamily,
    limit: u32,
) -> QualityResult<Rows> {
    Ok(db.query(&sql::orphaned_rows(family, limit), &[]).await?)
}

/// Child rows where one configured field is null/blank, capped at `limit`.
///
/// The field must be configured on the family; arbitrary column names are
/// rejected rather than spliced into SQL.
pub async fn rows_missing_field(
    db: &dyn Database,
    family: &RecordFamily,
    field_name: &str,
    limit: u32,
) -> QualityResult<Rows> {
    let field = family
        .field(field_name)
        .ok_or_else(|| QualityError::UnknownField {
            field: field_name.to_string(),
            family: family.name.clone(),
        })?;
    Ok(db
        .query(&sql::rows_missing_field(family, field, limit), &[])
        .await?)
}

/// Assemble the full completeness report for one family.
///
/// Short-circuits with `NoData` on an empty child table before any rate is
/// computed. A family with no recommended fields gets `None` for the
/// recommended average and composite score.
pub async fn run_report(
    db: &dyn Database,
    family: &RecordFamily,
    options: &ReportOptions,
) -> QualityResult<CompletenessReport> {
    let total = total_child_records(db, family).await?;
    if total == 0 {
        return Err(QualityError::NoData {
            table: family.child_table.clone(),
        });
    }

    let links = parent_child_gaps(db, family).await?;
    let required_rates = rates_for_group(db, family, FieldGroup::Required, total).await?;
    let recommended_rates = match rates_for_group(db, family, FieldGroup::Recommended, total).await
    {
        Ok(rates) => rates,
        Err(QualityError::EmptyFieldSet { .. }) => Vec::new(),
        Err(e) => return Err(e),
    };

    let required_values: Vec<f64> = required_rates.iter().map(|r| r.rate).collect();
    let recommended_values: Vec<f64> = recommended_rates.iter().map(|r| r.rate).collect();

    let required_avg = round2(mean(&required_values).ok_or(QualityError::EmptyFieldSet {
        group: FieldGroup::Required,
    })?);
    let recommended_avg = mean(&recommended_values).map(round2);
    let composite = match composite_score(
        &required_values,
        &recommended_values,
        options.required_weight,
    ) {
        Ok(score) => Some(round2(score)),
        Err(QualityError::EmptyFieldSet { .. }) => None,
        Err(e) => return Err(e),
    };

    let by_org = match &options.org_column {
        Some(org_column) => by_organization(db, family, org_column, options.org_group).await?,
        None => Vec::new(),
    };

    Ok(CompletenessReport {
        family: family.name.clone(),
        generated_at: Utc::now(),
        total_child_records: total,
        links,
        required_rates,
        recommended_rates,
        required_avg,
        recommended_avg,
        composite_score: composite,
        by_organization: by_org,
    })
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod analyzer_test;
