//! Validation contract between the tokenizer and a schema engine.
//!
//! Any engine able to check a [`RawFlags`] mapping under an [`UnknownKeys`]
//! mode can sit behind a [`FlagParser`](crate::FlagParser). The built-in
//! engine is [`ObjectSchema`](crate::ObjectSchema).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::tokenizer::RawFlags;

/// How keys that the schema does not declare are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Undeclared keys are dropped from the result
    #[default]
    Strip,

    /// Undeclared keys fail validation
    Strict,

    /// Undeclared keys are kept verbatim alongside the declared ones
    Passthrough,
}

/// A schema engine that turns raw flags into a validated value.
pub trait Validator {
    /// Shape of a successfully validated result
    type Output;

    /// Validate `raw` under `mode`, reporting every offending field on failure.
    fn validate(&self, raw: &RawFlags, mode: UnknownKeys) -> Result<Self::Output, ValidationReport>;
}

impl<V: Validator + ?Sized> Validator for &V {
    type Output = V::Output;

    fn validate(&self, raw: &RawFlags, mode: UnknownKeys) -> Result<Self::Output, ValidationReport> {
        (**self).validate(raw, mode)
    }
}

/// Structured description of a failed validation.
///
/// Problems tied to one field go in `field_errors` (field order preserved);
/// problems with the object as a whole, such as unrecognized keys, go in
/// `form_errors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub form_errors: Vec<String>,
    pub field_errors: IndexMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a problem that concerns the whole object
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    /// Add a problem for a single field
    pub fn add_field_error(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for one field
    pub fn field_messages(&self, field: &str) -> Vec<&str> {
        self.field_errors
            .get(field)
            .map(|messages| messages.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of every field with at least one error
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.field_errors.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// `Ok(value)` when nothing was reported, otherwise the report itself
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationReport> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_collects_every_message() {
        let mut report = ValidationReport::new();
        report.add_field_error("output", "Expected string, received boolean");
        report.add_field_error("output", "Too short");
        report.add_field_error("count", "Required");
        report.add_form_error("Unrecognized key(s) in object: 'x'");

        assert_eq!(report.field_messages("output"), vec!["Expected string, received boolean", "Too short"]);
        assert_eq!(report.fields().collect::<Vec<_>>(), vec!["output", "count"]);
        assert!(report.field_messages("missing").is_empty());
    }

    #[test]
    fn test_report_serializes_with_camel_case_keys() {
        let mut report = ValidationReport::new();
        report.add_field_error("output", "Required");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value, json!({ "formErrors": [], "fieldErrors": { "output": ["Required"] } }));
    }

    #[test]
    fn test_deserialized_report_accepts_more_messages() {
        let mut report: ValidationReport = serde_json::from_value(json!({
            "formErrors": [],
            "fieldErrors": { "output": ["Required"] }
        }))
        .unwrap();

        report.add_field_error("output", "Expected string, received boolean");
        report.add_field_error("jobs", "Required");

        assert_eq!(report.field_messages("output"), vec!["Required", "Expected string, received boolean"]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "formErrors": [],
                "fieldErrors": {
                    "output": ["Required", "Expected string, received boolean"],
                    "jobs": ["Required"]
                }
            })
        );
    }

    #[test]
    fn test_field_errors_must_be_message_lists() {
        let parsed = serde_json::from_value::<ValidationReport>(json!({
            "formErrors": [],
            "fieldErrors": { "output": "Required" }
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_empty_report_is_ok() {
        assert_eq!(ValidationReport::new().into_result(3), Ok(3));

        let mut report = ValidationReport::new();
        report.add_form_error("bad");
        assert!(report.into_result(3).is_err());
    }

    #[test]
    fn test_unknown_keys_default_is_strip() {
        assert_eq!(UnknownKeys::default(), UnknownKeys::Strip);
    }
}
