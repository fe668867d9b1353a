//! Serde default helpers for the config and family types.

/// Default for `FieldSpec::text`: a field is treated as text (trimmed-blank
/// counts as missing) unless the configuration says otherwise.
pub fn default_true() -> bool {
    true
}
