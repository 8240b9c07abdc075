//! Tokenizer for command line arguments.
//!
//! Turns an argument vector into a flat, insertion-ordered mapping of flag
//! names to raw values. A flag followed by a non-flag token takes that token
//! as its value; otherwise it is recorded as the boolean `true`. Positional
//! tokens are skipped.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

/// Raw result of tokenizing an argument vector.
///
/// Keys keep the order in which each flag was first seen. A repeated flag
/// overwrites its earlier value without moving.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawFlags {
    values: Map<String, Value>,
}

impl RawFlags {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a flag that was not followed by a value
    pub fn insert_switch(&mut self, name: &str) {
        self.values.insert(name.to_string(), Value::Bool(true));
    }

    /// Record a flag together with the token that followed it
    pub fn insert_value(&mut self, name: &str, value: &str) {
        self.values
            .insert(name.to_string(), Value::String(value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over `(name, value)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Flag names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the mapping, yielding the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

impl From<RawFlags> for Value {
    fn from(raw: RawFlags) -> Self {
        Value::Object(raw.values)
    }
}

/// Check whether a token is a flag.
///
/// Long flags start with `--`; short flags are a `-` and exactly one more
/// character. A lone `-` is positional.
pub fn is_flag(token: &str) -> bool {
    token.starts_with("--") || (token.starts_with('-') && token.chars().count() == 2)
}

/// Strip the leading `--` or `-` from a flag token.
pub fn flag_name(token: &str) -> &str {
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token)
}

/// Tokenize an argument vector (program name already removed).
///
/// The bare token `--` ends the preceding flag but records nothing and
/// consumes nothing.
pub fn tokenize<I, S>(argv: I) -> RawFlags
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = RawFlags::new();
    let mut tokens = argv.into_iter().peekable();

    while let Some(token) = tokens.next() {
        let token = token.as_ref();

        if !is_flag(token) {
            trace!(token, "skipping positional token");
            continue;
        }

        let name = flag_name(token);
        if name.is_empty() {
            continue;
        }

        match tokens.next_if(|next| !is_flag(next.as_ref())) {
            Some(value) => result.insert_value(name, value.as_ref()),
            None => result.insert_switch(name),
        }
    }

    result
}
