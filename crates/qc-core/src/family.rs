//! Record family definitions.
//!
//! A record family is a configured child/parent table pair plus its join
//! column and field lists, used as the unit of completeness analysis. The
//! three EMR families (order items, lab items, clinical items) ship as
//! built-in defaults; any number of families can be configured.

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::default_true;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single analyzed field on the child table.
///
/// `text` fields count trimmed-empty strings as missing in addition to
/// NULL; non-text fields (dates, timestamps, numerics) only NULL. In YAML a
/// field may be written as a bare string (text assumed) or as a map:
///
/// ```yaml
/// required_fields:
///   - drug_name
///   - name: operation_time
///     text: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FieldSpecDe")]
pub struct FieldSpec {
    pub name: String,
    pub text: bool,
}

impl FieldSpec {
    /// A text field: NULL or trimmed-empty counts as missing.
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: true,
        }
    }

    /// A non-text field: only NULL counts as missing.
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: false,
        }
    }
}

/// Deserialization shape for [`FieldSpec`]: bare string or full map.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldSpecDe {
    Name(String),
    Full {
        name: String,
        #[serde(default = "default_true")]
        text: bool,
    },
}

impl From<FieldSpecDe> for FieldSpec {
    fn from(de: FieldSpecDe) -> Self {
        match de {
            FieldSpecDe::Name(name) => FieldSpec { name, text: true },
            FieldSpecDe::Full { name, text } => FieldSpec { name, text },
        }
    }
}

/// Which field list of a family an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Required,
    Recommended,
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldGroup::Required => write!(f, "required"),
            FieldGroup::Recommended => write!(f, "recommended"),
        }
    }
}

/// A configured child/parent table pair with its join column and field
/// lists.
///
/// Table names are schema-qualified and come from trusted configuration,
/// never from request-time user input. They are quoted before being spliced
/// into SQL text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordFamily {
    /// Family name, used on the CLI and in report output
    pub name: String,

    /// Qualified child (item) table name
    pub child_table: String,

    /// Qualified parent table name
    pub parent_table: String,

    /// Column on the child table referencing the parent's key
    pub join_column: String,

    /// Parent primary-key column the join column references
    #[serde(default = "default_parent_key")]
    pub parent_key: String,

    /// Fields that must be populated on every child row
    pub required_fields: Vec<FieldSpec>,

    /// Fields that should be populated but are not mandatory
    #[serde(default)]
    pub recommended_fields: Vec<FieldSpec>,

    /// Human-readable name for the parent table in report output
    pub parent_display_name: String,
}

fn default_parent_key() -> String {
    "id".to_string()
}

impl RecordFamily {
    /// The field list for a group.
    pub fn fields(&self, group: FieldGroup) -> &[FieldSpec] {
        match group {
            FieldGroup::Required => &self.required_fields,
            FieldGroup::Recommended => &self.recommended_fields,
        }
    }

    /// Look up a configured field by name across both groups.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.required_fields
            .iter()
            .chain(self.recommended_fields.iter())
            .find(|f| f.name == name)
    }

    /// Validate the family definition. Surfaces configuration problems
    /// before any query is attempted.
    pub fn validate(&self) -> CoreResult<()> {
        let invalid = |reason: &str| CoreError::InvalidFamily {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidFamily {
                name: "<unnamed>".to_string(),
                reason: "family name cannot be empty".to_string(),
            });
        }
        if self.child_table.trim().is_empty() {
            return Err(invalid("child_table cannot be empty"));
        }
        if self.parent_table.trim().is_empty() {
            return Err(invalid("parent_table cannot be empty"));
        }
        if self.join_column.trim().is_empty() {
            return Err(invalid("join_column cannot be empty"));
        }
        if self.parent_key.trim().is_empty() {
            return Err(invalid("parent_key cannot be empty"));
        }
        if self.required_fields.is_empty() {
            return Err(invalid("at least one required field must be listed"));
        }
        for field in self
            .required_fields
            .iter()
            .chain(self.recommended_fields.iter())
        {
            if field.name.trim().is_empty() {
                return Err(invalid("field names cannot be empty"));
            }
        }
        Ok(())
    }
}

/// The three built-in EMR record families.
///
/// Tables and field lists follow the `emr_back` warehouse schema: drug
/// order items under order prescriptions, lab result items under lab
/// worksheets, and clinical test items under clinical test forms.
pub fn builtin_families() -> Vec<RecordFamily> {
    vec![
        RecordFamily {
            name: "order_item".to_string(),
            child_table: "emr_back.emr_order_item".to_string(),
            parent_table: "emr_back.emr_order".to_string(),
            join_column: "order_id".to_string(),
            parent_key: "id".to_string(),
            required_fields: vec![
                FieldSpec::text("drug_code"),
                FieldSpec::text("drug_name"),
                FieldSpec::plain("operation_time"),
            ],
            recommended_fields: vec![
                FieldSpec::text("drug_specifications"),
                FieldSpec::text("drug_dosage_code"),
                FieldSpec::text("drug_dosage_unit_code"),
                FieldSpec::text("drug_dosage_unit_name"),
                FieldSpec::plain("drug_dosage_total"),
            ],
            parent_display_name: "order prescription".to_string(),
        },
        RecordFamily {
            name: "lab_item".to_string(),
            child_table: "emr_back.emr_ex_lab_item".to_string(),
            parent_table: "emr_back.emr_ex_lab".to_string(),
            join_column: "ex_lab_id".to_string(),
            parent_key: "id".to_string(),
            required_fields: vec![
                FieldSpec::text("lab_item_code"),
                FieldSpec::text("lab_item_name"),
                FieldSpec::text("item_result"),
            ],
            recommended_fields: vec![
                FieldSpec::text("item_unit"),
                FieldSpec::text("item_result_flag"),
                FieldSpec::text("reference_range"),
                FieldSpec::text("critical_value_flag"),
            ],
            parent_display_name: "lab worksheet".to_string(),
        },
        RecordFamily {
            name: "clinical_item".to_string(),
            child_table: "emr_back.emr_ex_clinical_item".to_string(),
            parent_table: "emr_back.emr_ex_clinical".to_string(),
            join_column: "ex_clinical_id".to_string(),
            parent_key: "id".to_string(),
            required_fields: vec![
                FieldSpec::text("clinical_item_code"),
                FieldSpec::text("clinical_item_name"),
                FieldSpec::text("item_result"),
            ],
            recommended_fields: vec![
                FieldSpec::text("item_unit"),
                FieldSpec::text("item_method"),
                FieldSpec::text("item_device"),
                FieldSpec::text("item_result_flag"),
            ],
            parent_display_name: "clinical test form".to_string(),
        },
    ]
}

#[cfg(test)]
#[path = "family_test.rs"]
mod family_test;
