//! JSON log checker.
//!
//! The whole file is one JSON object. Its discriminant picks the rule.

use serde_json::Value;

use super::value_kind;
use crate::error::{Finding, Outcome};
use crate::schema::LogSchema;

/// Validate a JSON log document against `schema`.
///
/// Invalid JSON is reported with the decoder's own message. All absent fields
/// are reported together.
#[must_use]
pub fn check_json_log(content: &str, schema: &LogSchema) -> Outcome {
    let document = match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Finding::DocumentParseError(format!(
                "expected a JSON object at top level, found {}",
                value_kind(&other)
            ))
            .into();
        }
        Err(e) => return Finding::DocumentParseError(e.to_string()).into(),
    };

    let missing = schema.missing_fields(&document);
    if missing.is_empty() {
        Outcome::Valid
    } else {
        Finding::MissingRequiredFields(missing).into()
    }
}
