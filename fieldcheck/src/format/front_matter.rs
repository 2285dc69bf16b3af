//! Markdown front-matter checker.
//!
//! A document qualifies only if it opens with `---\n`, followed by the header
//! text, followed by `\n---`. The first closing delimiter ends the header.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use serde_saphyr::{DuplicateKeyPolicy, Options};

use super::value_kind;
use crate::error::{Finding, Outcome};
use crate::schema::FrontMatterSchema;

static FRONT_MATTER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?s)\A---\n(.*?)\n---") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid front matter regex: {err}"),
    }
});

/// `\r\n` and lone `\r` both become `\n`.
fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// A repeated header key keeps its last value.
fn header_options() -> Options {
    Options {
        duplicate_keys: DuplicateKeyPolicy::LastWins,
        ..Options::default()
    }
}

/// The raw header text between the delimiters, if present.
#[must_use]
pub fn extract_header(content: &str) -> Option<&str> {
    FRONT_MATTER_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Validate the front-matter block of `content` against `schema`.
#[must_use]
pub fn check_front_matter(content: &str, schema: &FrontMatterSchema) -> Outcome {
    let content = normalize_newlines(content);
    let Some(header) = extract_header(&content) else {
        return Finding::MissingHeaderBlock.into();
    };

    let fields = match serde_saphyr::from_str_with_options::<Value>(header, header_options()) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Finding::HeaderParseError(format!(
                "front matter is not a mapping: {}",
                value_kind(&other)
            ))
            .into();
        }
        Err(e) => return Finding::HeaderParseError(e.to_string()).into(),
    };

    schema.first_missing(&fields).map_or(Outcome::Valid, |field| {
        Finding::MissingRequiredField(field.to_owned()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "---\ntitle: Entry\ndescription: Opens a position\nphase: 2\nroute: /trade/entry\nversion: 1.0\n---\n\n# Body\n";

    fn check(content: &str) -> String {
        check_front_matter(content, &FrontMatterSchema::default()).status()
    }

    #[test]
    fn test_complete_front_matter_is_ok() {
        assert_eq!(check(FULL), "OK");
    }

    #[test]
    fn test_no_delimiters_is_missing_front_matter() {
        assert_eq!(check("# Just a heading\n\nbody\n"), "Missing front matter");
        assert_eq!(check(""), "Missing front matter");
    }

    #[test]
    fn test_block_must_start_the_file() {
        let content = format!("\n{FULL}");
        assert_eq!(check(&content), "Missing front matter");
    }

    #[test]
    fn test_unclosed_block_is_missing_front_matter() {
        assert_eq!(check("---\ntitle: x\nbody without closing\n"), "Missing front matter");
    }

    #[test]
    fn test_first_closing_delimiter_ends_header() {
        // Only `title` is in the header; the second block is body text.
        let content = "---\ntitle: a\n---\ndescription: b\nphase: c\nroute: d\nversion: e\n---\n";
        assert_eq!(check(content), "Missing description");
    }

    #[test]
    fn test_only_first_missing_field_reported() {
        let content = "---\ntitle: a\ndescription: b\nphase: c\n---\n";
        assert_eq!(check(content), "Missing route");

        let content = "---\ntitle: a\ndescription: b\nphase: c\nroute: d\n---\n";
        assert_eq!(check(content), "Missing version");
    }

    #[test]
    fn test_null_values_count_as_present() {
        let content = "---\ntitle:\ndescription:\nphase:\nroute:\nversion:\n---\n";
        assert_eq!(check(content), "OK");
    }

    #[test]
    fn test_nested_values_are_accepted() {
        let content = "---\ntitle: a\ndescription: b\nphase:\n  name: build\n  order: 3\nroute:\n  - /a\n  - /b\nversion: 1\n---\n";
        assert_eq!(check(content), "OK");
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let content = "---\ntitle: [unclosed\n---\n";
        assert_eq!(check(content), "YAML parse error");
    }

    #[test]
    fn test_non_mapping_header_is_parse_error() {
        assert_eq!(check("---\n- a\n- b\n---\n"), "YAML parse error");
        assert_eq!(check("---\njust text\n---\n"), "YAML parse error");
    }

    #[test]
    fn test_crlf_line_endings_are_accepted() {
        let content = FULL.replace('\n', "\r\n");
        assert_eq!(check(&content), "OK");
    }

    #[test]
    fn test_lone_cr_line_endings_are_accepted() {
        assert_eq!(check("---\rtitle: a\r---\r"), "Missing description");
        let content = FULL.replace('\n', "\r");
        assert_eq!(check(&content), "OK");
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let content = "---\ntitle: a\ndescription: b\nphase: c\nroute: d\nversion: e\ntitle: again\n---\n";
        assert_eq!(check(content), "OK");
    }

    #[test]
    fn test_extract_header() {
        assert_eq!(extract_header("---\na: 1\n---\nbody"), Some("a: 1"));
        assert_eq!(extract_header("no header"), None);
    }
}
