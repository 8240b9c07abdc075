//! Per-field coercion of raw flag values.

use std::str::FromStr;

use serde_json::{Number, Value};

use super::FieldKind;

/// Convert a raw value to the type `kind` declares.
///
/// Raw flag values are either `true` or a string; values already of the
/// target type (such as schema defaults) pass through.
pub(crate) fn coerce(kind: &FieldKind, value: &Value) -> Result<Value, String> {
    match kind {
        FieldKind::Any => Ok(value.clone()),

        FieldKind::String => match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(format!("Expected string, received {}", received(other))),
        },

        FieldKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(text) => match text.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(Value::Bool(true)),
                "false" | "no" | "0" | "off" => Ok(Value::Bool(false)),
                _ => Err(format!("Expected boolean, received {}", received(value))),
            },
            other => Err(format!("Expected boolean, received {}", received(other))),
        },

        FieldKind::Number => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(text) => parse_number(text.trim())
                .ok_or_else(|| format!("Expected number, received {}", received(value))),
            other => Err(format!("Expected number, received {}", received(other))),
        },

        FieldKind::Integer => match value {
            Value::Number(n) if n.is_i64() => Ok(value.clone()),
            Value::String(text) => i64::from_str(text.trim())
                .map(Value::from)
                .map_err(|_| format!("Expected integer, received {}", received(value))),
            other => Err(format!("Expected integer, received {}", received(other))),
        },

        FieldKind::Enum { values } => match value {
            Value::String(text) if values.iter().any(|allowed| allowed == text) => Ok(value.clone()),
            other => {
                let expected: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
                Err(format!(
                    "Invalid enum value. Expected {}, received {}",
                    expected.join(" | "),
                    received(other)
                ))
            }
        },
    }
}

/// Integers stay integers so they deserialize into integer struct fields.
fn parse_number(text: &str) -> Option<Value> {
    if let Ok(int) = i64::from_str(text) {
        return Some(Value::from(int));
    }

    f64::from_str(text)
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Short description of a value for error messages
fn received(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{}'", text),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn levels() -> FieldKind {
        FieldKind::Enum {
            values: vec!["debug".to_string(), "info".to_string()],
        }
    }

    #[test]
    fn test_string_rejects_switch() {
        assert_eq!(coerce(&FieldKind::String, &json!("file.txt")), Ok(json!("file.txt")));
        assert_eq!(
            coerce(&FieldKind::String, &json!(true)),
            Err("Expected string, received boolean".to_string())
        );
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(coerce(&FieldKind::Boolean, &json!(true)), Ok(json!(true)));
        assert_eq!(coerce(&FieldKind::Boolean, &json!("Off")), Ok(json!(false)));
        assert_eq!(coerce(&FieldKind::Boolean, &json!("yes")), Ok(json!(true)));
        assert_eq!(
            coerce(&FieldKind::Boolean, &json!("maybe")),
            Err("Expected boolean, received 'maybe'".to_string())
        );
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(coerce(&FieldKind::Number, &json!("3")), Ok(json!(3)));
        assert_eq!(coerce(&FieldKind::Number, &json!(" 2.5 ")), Ok(json!(2.5)));
        assert_eq!(coerce(&FieldKind::Number, &json!(7)), Ok(json!(7)));
        assert!(coerce(&FieldKind::Number, &json!("NaN")).is_err());
        assert_eq!(
            coerce(&FieldKind::Number, &json!(true)),
            Err("Expected number, received boolean".to_string())
        );
    }

    #[test]
    fn test_integer_parsing() {
        assert_eq!(coerce(&FieldKind::Integer, &json!("-12")), Ok(json!(-12)));
        assert_eq!(
            coerce(&FieldKind::Integer, &json!("2.5")),
            Err("Expected integer, received '2.5'".to_string())
        );
        assert!(coerce(&FieldKind::Integer, &json!(2.5)).is_err());
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(coerce(&levels(), &json!("info")), Ok(json!("info")));
        assert_eq!(
            coerce(&levels(), &json!("trace")),
            Err("Invalid enum value. Expected 'debug' | 'info', received 'trace'".to_string())
        );
    }

    #[test]
    fn test_any_passes_through() {
        assert_eq!(coerce(&FieldKind::Any, &json!(true)), Ok(json!(true)));
        assert_eq!(coerce(&FieldKind::Any, &json!("x")), Ok(json!("x")));
    }
}
