//! Built-in schema engine.
//!
//! An [`ObjectSchema`] is an ordered list of field rules. It can be built in
//! code or loaded from a JSON or TOML document that maps each field name to
//! its rule:
//!
//! ```json
//! {
//!     "verbose": { "type": "boolean", "optional": true },
//!     "output":  { "type": "string" },
//!     "jobs":    { "type": "integer", "default": 4 },
//!     "level":   { "type": "enum", "values": ["debug", "info"] }
//! }
//! ```

mod coerce;
mod typed;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::tokenizer::RawFlags;
use crate::validation::{UnknownKeys, ValidationReport, Validator};
use crate::{FlagsError, Result};

pub use typed::TypedSchema;

/// Type a declared field must have after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Text value; a bare switch is rejected
    String,

    /// A bare switch, or a word like `true`/`off`
    Boolean,

    /// Any finite number
    Number,

    /// A signed 64-bit integer
    Integer,

    /// One of a fixed set of strings
    Enum { values: Vec<String> },

    /// Raw value, unchanged
    Any,
}

/// Rule for one declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(flatten)]
    pub kind: FieldKind,

    /// Absent values are omitted instead of reported
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,

    /// Value used when the flag is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldRule {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            optional: false,
            default: None,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String)
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number)
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer)
    }

    pub fn any() -> Self {
        Self::new(FieldKind::Any)
    }

    /// A string restricted to `values`
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check a raw flag value against this rule, returning the coerced value
    pub fn coerce(&self, value: &Value) -> std::result::Result<Value, String> {
        coerce::coerce(&self.kind, value)
    }
}

/// Ordered collection of field rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    fields: Vec<(String, FieldRule)>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field, replacing any earlier rule with the same name
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: FieldRule) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = rule,
            None => self.fields.push((name, rule)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wrap this schema so validation yields `T` instead of a JSON map
    pub fn typed<T>(self) -> TypedSchema<T> {
        TypedSchema::new(self)
    }

    /// Reject rules that could never validate: empty enums, and defaults
    /// that their own rule would refuse.
    pub fn check(&self) -> Result<()> {
        for (name, rule) in &self.fields {
            if let FieldKind::Enum { values } = &rule.kind {
                if values.is_empty() {
                    return Err(FlagsError::Schema(format!("field '{}' has an empty enum", name)));
                }
            }

            if let Some(default) = &rule.default {
                rule.coerce(default).map_err(|e| {
                    FlagsError::Schema(format!("default for field '{}' is invalid: {}", name, e))
                })?;
            }
        }

        Ok(())
    }

    /// Build a schema from a document mapping field names to rules
    pub fn from_document(document: Map<String, Value>) -> Result<Self> {
        let mut schema = Self::new();

        for (name, rule) in document {
            let rule: FieldRule = serde_json::from_value(rule)
                .map_err(|e| FlagsError::Schema(format!("field '{}': {}", name, e)))?;
            schema.insert(name, rule);
        }

        schema.check()?;
        Ok(schema)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: Map<String, Value> = serde_json::from_str(content)?;
        Self::from_document(document)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let document: Map<String, Value> = toml::from_str(content)?;
        Self::from_document(document)
    }

    /// Load a schema document, choosing TOML or JSON by file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        let schema = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };

        debug!(path = %path.display(), fields = schema.len(), "loaded schema");
        Ok(schema)
    }
}

impl FromIterator<(String, FieldRule)> for ObjectSchema {
    fn from_iter<I: IntoIterator<Item = (String, FieldRule)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, rule) in iter {
            schema.insert(name, rule);
        }
        schema
    }
}

impl Validator for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, raw: &RawFlags, mode: UnknownKeys) -> std::result::Result<Self::Output, ValidationReport> {
        let mut output = Map::new();
        let mut report = ValidationReport::new();

        for (name, rule) in &self.fields {
            match raw.get(name) {
                Some(value) => match rule.coerce(value) {
                    Ok(coerced) => {
                        output.insert(name.clone(), coerced);
                    }
                    Err(message) => report.add_field_error(name, message),
                },
                None => {
                    if let Some(default) = &rule.default {
                        match rule.coerce(default) {
                            Ok(coerced) => {
                                output.insert(name.clone(), coerced);
                            }
                            Err(message) => report.add_field_error(name, message),
                        }
                    } else if !rule.optional {
                        report.add_field_error(name, "Required");
                    }
                }
            }
        }

        let unknown: Vec<(&String, &Value)> = raw
            .iter()
            .filter(|(name, _)| self.get(name).is_none())
            .collect();

        match mode {
            UnknownKeys::Strip => {
                if !unknown.is_empty() {
                    debug!(count = unknown.len(), "dropping undeclared flags");
                }
            }
            UnknownKeys::Strict => {
                if !unknown.is_empty() {
                    let keys: Vec<String> = unknown.iter().map(|(name, _)| format!("'{}'", name)).collect();
                    report.add_form_error(format!("Unrecognized key(s) in object: {}", keys.join(", ")));
                }
            }
            UnknownKeys::Passthrough => {
                for (name, value) in unknown {
                    output.insert(name.clone(), value.clone());
                }
            }
        }

        report.into_result(output)
    }
}
