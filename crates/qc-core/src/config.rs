//! Configuration types and parsing for emrqc.yml

use crate::error::{CoreError, CoreResult};
use crate::family::{builtin_families, RecordFamily};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main project configuration from emrqc.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Warehouse connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Report policy (score weights, organization dimension)
    #[serde(default)]
    pub report: ReportConfig,

    /// Record families to analyze. Empty means the three built-in EMR
    /// families.
    #[serde(default)]
    pub families: Vec<RecordFamily>,
}

/// Warehouse connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB database path, or ":memory:"
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Schema holding the warehouse tables
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            schema: default_schema(),
        }
    }
}

/// Report policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Weight given to required-field completeness in the composite score.
    /// The recommended-field weight is the complement.
    #[serde(default = "default_required_weight")]
    pub required_weight: f64,

    /// Parent-table column holding the owning organization name. None
    /// disables the per-organization breakdown.
    #[serde(default = "default_org_column")]
    pub org_column: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            required_weight: default_required_weight(),
            org_column: default_org_column(),
        }
    }
}

fn default_db_path() -> String {
    "warehouse.duckdb".to_string()
}

fn default_schema() -> String {
    "emr_back".to_string()
}

fn default_required_weight() -> f64 {
    0.7
}

fn default_org_column() -> Option<String> {
    Some("org_name".to_string())
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for emrqc.yml or emrqc.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("emrqc.yml");
        let yaml_path = dir.join("emrqc.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: dir.join("emrqc.yml").display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.report.required_weight) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "report.required_weight must be within [0, 1], got {}",
                    self.report.required_weight
                ),
            });
        }

        if let Some(org_column) = &self.report.org_column {
            if org_column.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "report.org_column cannot be empty; omit it to disable".to_string(),
                });
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for family in &self.families {
            family.validate()?;
            if !seen.insert(family.name.as_str()) {
                return Err(CoreError::DuplicateFamily {
                    name: family.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// The configured families, or the built-in EMR families when none are
    /// configured.
    pub fn effective_families(&self) -> Vec<RecordFamily> {
        if self.families.is_empty() {
            builtin_families()
        } else {
            self.families.clone()
        }
    }

    /// Look up a family by name among the effective families.
    pub fn family(&self, name: &str) -> Option<RecordFamily> {
        self.effective_families().into_iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
