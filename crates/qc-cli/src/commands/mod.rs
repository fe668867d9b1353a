//! Command implementations for the emrqc CLI

pub(crate) mod common;
pub(crate) mod families;
pub(crate) mod missing;
pub(crate) mod orphans;
pub(crate) mod report;
pub(crate) mod schema;
