//! Core types for form schema translation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keyword renames applied before relocation (`old` -> `new`).
pub const DEFAULT_KEY_MAPPING: &[(&str, &str)] = &[
    ("maxItems", "max"),
    ("minItems", "min"),
    ("maximum", "max"),
    ("minimum", "min"),
];

/// Keys moved into the `parameters` bucket, in relocation order.
pub const DEFAULT_RELOCATED_KEYS: &[&str] = &["options", "min", "max"];

/// Keys a field record may carry in the final output.
pub const DEFAULT_ALLOWED_KEYS: &[&str] = &[
    "field_type",
    "parameters",
    "name",
    "rules",
    "description",
    "default",
    "when",
];

/// Returns the JSON type name for log and error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Options for translating a model schema into a form schema.
///
/// Every table the pipeline consults lives here and is handed to the passes
/// explicitly. `Default` reproduces the standard form layout.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `allowed-keys`). Missing fields
/// fall back to their defaults, unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TranslateOptions {
    /// Keyword renames (`maxItems` -> `max`, ...).
    pub key_mapping: BTreeMap<String, String>,
    /// Keys relocated into `parameters_key`, in order.
    pub relocated_keys: Vec<String>,
    /// Name of the bucket relocated keys are moved into.
    pub parameters_key: String,
    /// Wrapper key whose contents are spliced into the parent.
    pub promoted_key: String,
    /// Top-level key dropped from the output.
    pub removed_outer_key: String,
    /// Keys retained on each top-level field record.
    pub allowed_keys: Vec<String>,
    /// Discriminator field used when a discriminator does not name one itself.
    pub discriminator_field: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            key_mapping: DEFAULT_KEY_MAPPING
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            relocated_keys: DEFAULT_RELOCATED_KEYS.iter().map(|k| k.to_string()).collect(),
            parameters_key: "parameters".to_string(),
            promoted_key: "params".to_string(),
            removed_outer_key: "output_dataset_type".to_string(),
            allowed_keys: DEFAULT_ALLOWED_KEYS.iter().map(|k| k.to_string()).collect(),
            discriminator_field: "method".to_string(),
        }
    }
}

impl TranslateOptions {
    /// Create options with the standard tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the field-record whitelist.
    pub fn with_allowed_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list of keys relocated into `parameters`.
    pub fn with_relocated_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relocated_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Add or replace a single keyword rename.
    pub fn with_rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.key_mapping.insert(from.into(), to.into());
        self
    }

    /// Set the top-level key dropped from the output.
    pub fn with_removed_outer_key(mut self, key: impl Into<String>) -> Self {
        self.removed_outer_key = key.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables() {
        let opts = TranslateOptions::default();
        assert_eq!(opts.key_mapping.get("maximum").map(String::as_str), Some("max"));
        assert_eq!(opts.key_mapping.get("minItems").map(String::as_str), Some("min"));
        assert_eq!(opts.relocated_keys, vec!["options", "min", "max"]);
        assert_eq!(opts.allowed_keys.len(), 7);
        assert_eq!(opts.removed_outer_key, "output_dataset_type");
        assert_eq!(opts.discriminator_field, "method");
    }

    #[test]
    fn partial_options_fill_defaults() {
        let opts: TranslateOptions =
            serde_json::from_str(r#"{"allowed-keys": ["name"], "promoted-key": "extra"}"#)
                .unwrap();
        assert_eq!(opts.allowed_keys, vec!["name"]);
        assert_eq!(opts.promoted_key, "extra");
        assert_eq!(opts.parameters_key, "parameters");
        assert_eq!(opts.key_mapping.len(), 4);
    }

    #[test]
    fn unknown_option_rejected() {
        let result = serde_json::from_str::<TranslateOptions>(r#"{"allowed_keys": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn builders_replace_tables() {
        let opts = TranslateOptions::new()
            .with_allowed_keys(["name", "when"])
            .with_relocated_keys(["options"])
            .with_rename("maxLength", "max")
            .with_removed_outer_key("meta");
        assert_eq!(opts.allowed_keys, vec!["name", "when"]);
        assert_eq!(opts.relocated_keys, vec!["options"]);
        assert_eq!(opts.key_mapping.get("maxLength").map(String::as_str), Some("max"));
        assert_eq!(opts.removed_outer_key, "meta");
    }

    #[test]
    fn json_type_names() {
        assert_eq!(json_type_name(&Value::Null), "null");
        assert_eq!(json_type_name(&serde_json::json!([1])), "array");
        assert_eq!(json_type_name(&serde_json::json!({})), "object");
    }
}
