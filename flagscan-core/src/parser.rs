//! Schema-driven flag parser.
//!
//! A [`FlagParser`] couples a [`Validator`] with [`ParseOptions`]. Each call
//! to [`FlagParser::parse`] tokenizes an argument vector and validates the
//! result; the parser keeps no state between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tokenizer::{tokenize, RawFlags};
use crate::validation::{UnknownKeys, Validator};
use crate::{FlagsError, ObjectSchema, Result};

/// Options controlling how undeclared flags are handled.
///
/// `strict` and `passthrough` are mutually exclusive; with neither set,
/// undeclared flags are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Fail on flags the schema does not declare
    pub strict: bool,

    /// Keep flags the schema does not declare, unvalidated
    pub passthrough: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            passthrough: false,
        }
    }

    pub fn passthrough() -> Self {
        Self {
            strict: false,
            passthrough: true,
        }
    }

    /// Resolve the unknown-key mode, rejecting conflicting switches
    pub fn mode(&self) -> Result<UnknownKeys> {
        match (self.strict, self.passthrough) {
            (true, true) => Err(FlagsError::ConflictingModes),
            (true, false) => Ok(UnknownKeys::Strict),
            (false, true) => Ok(UnknownKeys::Passthrough),
            (false, false) => Ok(UnknownKeys::Strip),
        }
    }
}

/// Parser for command line flags based on a schema
#[derive(Debug, Clone)]
pub struct FlagParser<V = ObjectSchema> {
    validator: V,
    options: ParseOptions,
}

impl<V: Validator> FlagParser<V> {
    /// Create a parser. Conflicting options are reported by each call to
    /// [`parse`](Self::parse), not here.
    pub fn new(validator: V, options: ParseOptions) -> Self {
        Self { validator, options }
    }

    /// Create a parser with default options
    pub fn with_validator(validator: V) -> Self {
        Self::new(validator, ParseOptions::default())
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Tokenize without validating
    pub fn tokenize<I, S>(&self, argv: I) -> RawFlags
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokenize(argv)
    }

    /// Tokenize `argv` and validate the flags against the schema.
    ///
    /// `argv` must not include the program name.
    pub fn parse<I, S>(&self, argv: I) -> Result<V::Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mode = self.options.mode()?;
        let raw = tokenize(argv);

        debug!(?mode, flags = raw.len(), "validating flags");

        self.validator
            .validate(&raw, mode)
            .map_err(FlagsError::InvalidFlags)
    }

    /// Parse the current process arguments, skipping the program name.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn parse_env(&self) -> Result<V::Output> {
        let argv: Vec<String> = std::env::args_os()
            .skip(1)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        self.parse(argv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldRule;
    use crate::validation::ValidationReport;
    use serde_json::{json, Value};
    use std::cell::Cell;

    /// Records how often it was asked to validate.
    struct Counting {
        calls: Cell<usize>,
    }

    impl Validator for Counting {
        type Output = usize;

        fn validate(&self, raw: &RawFlags, _mode: UnknownKeys) -> std::result::Result<usize, ValidationReport> {
            self.calls.set(self.calls.get() + 1);
            Ok(raw.len())
        }
    }

    #[test]
    fn test_mode_resolution() {
        assert_eq!(ParseOptions::default().mode().unwrap(), UnknownKeys::Strip);
        assert_eq!(ParseOptions::strict().mode().unwrap(), UnknownKeys::Strict);
        assert_eq!(ParseOptions::passthrough().mode().unwrap(), UnknownKeys::Passthrough);

        let both = ParseOptions {
            strict: true,
            passthrough: true,
        };
        assert!(matches!(both.mode(), Err(FlagsError::ConflictingModes)));
    }

    #[test]
    fn test_conflict_is_raised_before_validation() {
        let validator = Counting { calls: Cell::new(0) };
        let parser = FlagParser::new(
            &validator,
            ParseOptions {
                strict: true,
                passthrough: true,
            },
        );

        let err = parser.parse(Vec::<String>::new()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot use strict and passthrough options together");
        assert_eq!(validator.calls.get(), 0);
    }

    #[test]
    fn test_custom_validator_sees_raw_flags() {
        let parser = FlagParser::with_validator(Counting { calls: Cell::new(0) });
        assert_eq!(parser.parse(["--a", "1", "pos", "--b"]).unwrap(), 2);
        assert_eq!(parser.parse(["--a"]).unwrap(), 1);
        assert_eq!(parser.validator().calls.get(), 2);
    }

    #[test]
    fn test_validation_failure_carries_report() {
        let schema = ObjectSchema::new().field("output", FieldRule::string());
        let parser = FlagParser::with_validator(schema);

        let err = parser.parse(["--output"]).unwrap_err();
        let report = err.report().unwrap();
        assert_eq!(report.field_messages("output"), vec!["Expected string, received boolean"]);
        assert!(err.to_string().starts_with("Invalid CLI Flags: {"));
    }

    #[test]
    fn test_tokenize_skips_validation() {
        let schema = ObjectSchema::new().field("output", FieldRule::string());
        let parser = FlagParser::new(schema, ParseOptions::strict());

        let raw = parser.tokenize(["--other", "x"]);
        assert_eq!(Value::from(raw), json!({ "other": "x" }));
    }

    #[test]
    fn test_parse_env_reads_process_args() {
        // The test harness's own arguments are undeclared, so strip mode drops them
        let parser = FlagParser::with_validator(ObjectSchema::new());
        assert!(parser.parse_env().unwrap().is_empty());

        let counting = FlagParser::with_validator(Counting { calls: Cell::new(0) });
        counting.parse_env().unwrap();
        assert_eq!(counting.validator().calls.get(), 1);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_value(json!({ "strict": true })).unwrap();
        assert_eq!(options, ParseOptions::strict());
    }
}
