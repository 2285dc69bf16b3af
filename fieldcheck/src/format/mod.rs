//! Format-specific document checkers.
//!
//! - `front_matter`: Markdown with a YAML header block
//! - `json_log`: whole-file JSON objects with a discriminant

pub mod front_matter;
pub mod json_log;

use serde_json::Value;

/// Short name of a JSON value's type, for messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
