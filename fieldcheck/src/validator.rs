//! Input-agnostic validation: content in, outcome out.

use crate::config::{DocumentKind, ValidationConfig};
use crate::error::Outcome;
use crate::format;

/// Validate one document's content according to `config.kind`.
#[must_use]
pub fn validate_document(content: &str, config: &ValidationConfig) -> Outcome {
    match config.kind {
        DocumentKind::FrontMatter => {
            format::front_matter::check_front_matter(content, &config.front_matter)
        }
        DocumentKind::JsonLog => format::json_log::check_json_log(content, &config.log_schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_kind() {
        let prompt = "---\ntitle: a\n---\n";
        let prompts = ValidationConfig::for_kind(DocumentKind::FrontMatter);
        let logs = ValidationConfig::for_kind(DocumentKind::JsonLog);

        assert_eq!(validate_document(prompt, &prompts).status(), "Missing description");
        assert!(
            validate_document(prompt, &logs)
                .status()
                .starts_with("ERROR: "),
            "front matter is not JSON"
        );
        assert_eq!(validate_document(r#"{"type": "x"}"#, &logs).status(), "OK");
        assert_eq!(
            validate_document(r#"{"type": "x"}"#, &prompts).status(),
            "Missing front matter"
        );
    }
}
