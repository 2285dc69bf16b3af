//! Required-field schemas.
//!
//! Front matter uses one fixed field list. JSON logs select a field list by
//! the value of a discriminant key (`type` by default); discriminants with no
//! rule require nothing.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every prompt front-matter block must define, in reporting order.
pub const FRONT_MATTER_FIELDS: &[&str] = &["title", "description", "phase", "route", "version"];

/// Default discriminant key for JSON logs.
pub const LOG_DISCRIMINANT: &str = "type";

const TRADE_FIELDS: &[&str] = &[
    "date",
    "ticker",
    "contract",
    "entry",
    "exit",
    "direction",
    "confidence",
    "source",
    "size",
    "rationale",
];

const BEHAVIOR_FIELDS: &[&str] = &["date", "tag", "notes", "behavior_tags"];

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| (*f).to_owned()).collect()
}

/// The fixed front-matter schema. It does not vary with `phase` or `route`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FrontMatterSchema {
    pub required: Vec<String>,
}

impl Default for FrontMatterSchema {
    fn default() -> Self {
        Self {
            required: owned(FRONT_MATTER_FIELDS),
        }
    }
}

impl FrontMatterSchema {
    /// First required field absent from `header`, in declaration order.
    #[must_use]
    pub fn first_missing(&self, header: &Map<String, Value>) -> Option<&str> {
        self.required
            .iter()
            .find(|field| !header.contains_key(field.as_str()))
            .map(String::as_str)
    }
}

/// Discriminant-keyed rule table for JSON logs.
///
/// ```yaml
/// discriminant: type
/// rules:
///   trade: [date, ticker, entry]
///   behavior: [date, tag]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct LogSchema {
    /// Top-level key whose string value selects a rule.
    #[serde(default = "default_discriminant")]
    pub discriminant: String,
    /// Discriminant value -> required fields, in reporting order.
    pub rules: BTreeMap<String, Vec<String>>,
}

fn default_discriminant() -> String {
    LOG_DISCRIMINANT.to_owned()
}

impl Default for LogSchema {
    fn default() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert("trade".to_owned(), owned(TRADE_FIELDS));
        rules.insert("behavior".to_owned(), owned(BEHAVIOR_FIELDS));
        Self {
            discriminant: default_discriminant(),
            rules,
        }
    }
}

impl LogSchema {
    /// Required fields for a discriminant value. Unknown or absent values
    /// map to an empty list.
    #[must_use]
    pub fn required_for(&self, discriminant: Option<&str>) -> &[String] {
        discriminant
            .and_then(|d| self.rules.get(d))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Every required field absent from `document`, in the rule's order.
    ///
    /// A discriminant that is missing or not a string selects no rule.
    #[must_use]
    pub fn missing_fields(&self, document: &Map<String, Value>) -> Vec<String> {
        let discriminant = document.get(&self.discriminant).and_then(Value::as_str);
        self.required_for(discriminant)
            .iter()
            .filter(|field| !document.contains_key(field.as_str()))
            .cloned()
            .collect()
    }

    /// Parse a rule table from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid rule table.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let schema: Self = serde_saphyr::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid YAML log schema: {e}"))?;
        schema.checked()
    }

    /// Parse a rule table from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid rule table.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        let schema: Self =
            serde_json::from_str(content).context("Invalid JSON log schema")?;
        schema.checked()
    }

    /// Load a rule table from disk. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read log schema {}", path.display()))?;
        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        };
        parsed.with_context(|| format!("Failed to load log schema {}", path.display()))
    }

    fn checked(self) -> anyhow::Result<Self> {
        if self.discriminant.is_empty() {
            anyhow::bail!("Log schema discriminant must not be empty");
        }
        Ok(self)
    }
}
