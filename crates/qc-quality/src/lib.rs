//! qc-quality - Completeness analyzer for emrqc
//!
//! Computes referential-completeness metrics over configured record
//! families: per-field null/blank rates, parent/child gap counts
//! (parentless parents, orphaned children), weighted composite scores, and
//! per-organization breakdowns. Every operation is a stateless, read-only
//! aggregate over the live warehouse; nothing is cached or written back.

pub mod analyzer;
pub mod error;
pub mod report;
pub mod score;
pub(crate) mod sql;

pub use analyzer::{
    by_organization, field_null_rates, orphaned_rows, parent_child_gaps, rows_missing_field,
    run_report, total_child_records, ReportOptions,
};
pub use error::{QualityError, QualityResult};
pub use report::{CompletenessReport, FieldRate, LinkStats, OrgCompletenessRow, OrgFieldStat};
pub use score::{composite_score, round2};
