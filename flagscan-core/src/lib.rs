//! Core types and functionality for flagscan.
//!
//! This crate tokenizes command line argument vectors into flag/value pairs
//! and validates the result against a schema. The tokenizer is independent of
//! the schema engine: anything implementing [`Validator`] can check the raw
//! flags, and [`ObjectSchema`] is the engine shipped here.
//!
//! ```
//! use flagscan_core::{FieldRule, FlagParser, ObjectSchema, ParseOptions};
//! use serde_json::json;
//!
//! let schema = ObjectSchema::new()
//!     .field("verbose", FieldRule::boolean().optional())
//!     .field("output", FieldRule::string().optional());
//!
//! let parser = FlagParser::new(schema, ParseOptions::default());
//! let flags = parser.parse(["build", "--verbose", "--output", "file.txt"]).unwrap();
//!
//! assert_eq!(flags["verbose"], json!(true));
//! assert_eq!(flags["output"], json!("file.txt"));
//! ```

mod error;
mod parser;
pub mod schema;
pub mod tokenizer;
mod validation;

// Re-export core types
pub use error::{FlagsError, Result};
pub use parser::{FlagParser, ParseOptions};
pub use schema::{FieldKind, FieldRule, ObjectSchema, TypedSchema};
pub use tokenizer::{tokenize, RawFlags};
pub use validation::{UnknownKeys, ValidationReport, Validator};

/// Re-export of the value type results are expressed in
pub use serde_json::{Map, Value};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
