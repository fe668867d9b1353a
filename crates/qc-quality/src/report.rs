//! Derived report types.
//!
//! All of these are recomputed on every request from live warehouse state
//! and never persisted. Rates are percentages in [0, 100], rounded to two
//! decimals so exports preserve the displayed precision.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Completeness rate for a single configured field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRate {
    pub field: String,
    /// Percent of rows where the field is populated (non-null, and
    /// non-blank for text fields).
    pub rate: f64,
}

/// Parent/child gap counts for one family.
///
/// The four counts come from independent queries with no shared
/// transaction: under concurrent warehouse writes they are point-in-time
/// snapshots, not a mutually consistent view. Accepted trade-off for a
/// reporting system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Distinct parent rows with at least one child
    pub parents_with_children: u64,
    /// Parent rows with no children
    pub parents_without_children: u64,
    /// Child rows whose join key matches an existing parent
    pub valid_children: u64,
    /// Child rows whose join key matches no parent
    pub orphaned_children: u64,
}

/// Per-field missing statistics within one organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgFieldStat {
    pub field: String,
    pub missing_count: u64,
    pub missing_rate: f64,
}

/// One organization's slice of the per-organization breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgCompletenessRow {
    pub organization: String,
    pub record_count: u64,
    pub field_stats: Vec<OrgFieldStat>,
    /// Combined field completeness percent over the analyzed field group
    pub completeness: f64,
}

/// Full completeness report for one record family.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    pub family: String,
    pub generated_at: DateTime<Utc>,
    pub total_child_records: u64,
    #[serde(flatten)]
    pub links: LinkStats,
    /// Per-field completeness rates, in configured field order
    pub required_rates: Vec<FieldRate>,
    /// Empty when the family configures no recommended fields
    pub recommended_rates: Vec<FieldRate>,
    pub required_avg: f64,
    /// None when the family configures no recommended fields
    pub recommended_avg: Option<f64>,
    /// Weighted blend of the group averages; None when the recommended
    /// group is empty (the blend is undefined, not zero)
    pub composite_score: Option<f64>,
    /// Sorted by completeness descending, then record count descending.
    /// Empty when no organization column is configured.
    pub by_organization: Vec<OrgCompletenessRow>,
}
