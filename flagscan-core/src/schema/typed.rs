//! Schema wrapper that deserializes validated flags into a caller type.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ObjectSchema;
use crate::tokenizer::RawFlags;
use crate::validation::{UnknownKeys, ValidationReport, Validator};

/// An [`ObjectSchema`] whose validated output is deserialized into `T`.
///
/// Build one with [`ObjectSchema::typed`].
pub struct TypedSchema<T> {
    schema: ObjectSchema,
    _output: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    pub fn new(schema: ObjectSchema) -> Self {
        Self {
            schema,
            _output: PhantomData,
        }
    }

    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    pub fn into_inner(self) -> ObjectSchema {
        self.schema
    }
}

impl<T> Clone for TypedSchema<T> {
    fn clone(&self) -> Self {
        Self::new(self.schema.clone())
    }
}

impl<T> fmt::Debug for TypedSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSchema")
            .field("schema", &self.schema)
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Validator for TypedSchema<T> {
    type Output = T;

    fn validate(&self, raw: &RawFlags, mode: UnknownKeys) -> Result<T, ValidationReport> {
        let validated = self.schema.validate(raw, mode)?;

        serde_json::from_value(Value::Object(validated)).map_err(|e| {
            let mut report = ValidationReport::new();
            report.add_form_error(e.to_string());
            report
        })
    }
}
