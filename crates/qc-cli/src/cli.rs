//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// emrqc - data-quality reporting for an EMR warehouse
#[derive(Parser, Debug)]
#[command(name = "emrqc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database file path
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Introspect warehouse tables, columns and constraints
    Schema(SchemaArgs),

    /// Run completeness reports for record families
    Report(ReportArgs),

    /// List child rows whose parent record is missing
    Orphans(OrphansArgs),

    /// List child rows missing a specific field
    Missing(MissingArgs),

    /// Show the configured record families
    Families(FamiliesArgs),
}

/// Arguments for the schema command
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Schema to introspect (default: schema from config)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub output: SchemaOutput,

    /// Write the JSON document to a file instead of stdout
    #[arg(short, long)]
    pub write: Option<String>,
}

/// Schema output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutput {
    /// Human-readable table listing
    Pretty,
    /// Full JSON document
    Json,
}

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Family names to report on (comma-separated, default: all)
    #[arg(short, long)]
    pub family: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ReportOutput,

    /// Field group used for the per-organization breakdown
    #[arg(long, value_enum, default_value = "required")]
    pub org_group: OrgGroup,

    /// Skip the per-organization breakdown
    #[arg(long)]
    pub no_orgs: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub write: Option<String>,
}

/// Report output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutput {
    /// Human-readable tables
    Table,
    /// Full JSON report
    Json,
    /// Per-organization breakdown as CSV
    Csv,
}

/// Field group selector for the per-organization breakdown
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgGroup {
    /// Mandatory fields
    Required,
    /// Suggested fields
    Recommended,
}

/// Arguments for the orphans command
#[derive(Args, Debug)]
pub struct OrphansArgs {
    /// Family whose child table to inspect
    #[arg(short, long)]
    pub family: String,

    /// Maximum number of rows to return
    #[arg(short, long, default_value_t = 1000)]
    pub limit: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: RowsOutput,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub write: Option<String>,
}

/// Arguments for the missing command
#[derive(Args, Debug)]
pub struct MissingArgs {
    /// Family whose child table to inspect
    #[arg(short, long)]
    pub family: String,

    /// Field that must be null or blank
    #[arg(long)]
    pub field: String,

    /// Maximum number of rows to return
    #[arg(short, long, default_value_t = 1000)]
    pub limit: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: RowsOutput,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub write: Option<String>,
}

/// Row-listing output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsOutput {
    /// Table format
    Table,
    /// CSV with a header row
    Csv,
}

/// Arguments for the families command
#[derive(Args, Debug)]
pub struct FamiliesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: FamiliesOutput,
}

/// Families output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamiliesOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;
