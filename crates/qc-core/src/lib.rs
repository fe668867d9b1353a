//! qc-core - Core library for emrqc
//!
//! This crate provides shared types used across all emrqc components:
//! project configuration, record family definitions, identifier quoting
//! utilities, and the core error type.

pub mod config;
pub mod error;
pub mod family;
pub(crate) mod serde_helpers;
pub mod sql_utils;

pub use config::{Config, DatabaseConfig, ReportConfig};
pub use error::CoreError;
pub use family::{builtin_families, FieldGroup, FieldSpec, RecordFamily};
