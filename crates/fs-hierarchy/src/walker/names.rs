//! Structured metadata carried in entry names.
//!
//! Names follow `core - components - description.ext`, where components mix
//! `(key value words)` groups with space-separated keywords, e.g.
//! `Report - draft (year 2018) final - quarterly numbers.pdf`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static KEY_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\(\S* [^\(]*\))").expect("key/value regex should compile")
});

static COLLAPSE_WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// What a name says about its entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMetadata {
    pub core_name: String,
    pub keywords: Vec<String>,
    /// Key/value pairs in the order they appear in the name.
    pub key_values: Vec<(String, String)>,
    pub description: String,
    /// Text after the last `.`, without the dot.
    pub extension: Option<String>,
}

impl NameMetadata {
    pub fn key_value(&self, key: &str) -> Option<&str> {
        self.key_values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Turns a raw entry name into [`NameMetadata`].
pub trait NameMetadataExtractor {
    fn extract(&self, name: &str) -> NameMetadata;
}

impl<F> NameMetadataExtractor for F
where
    F: Fn(&str) -> NameMetadata,
{
    fn extract(&self, name: &str) -> NameMetadata {
        self(name)
    }
}

/// The `core - components - description.ext` naming convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordParser;

impl KeywordParser {
    pub fn new() -> Self {
        Self
    }
}

impl NameMetadataExtractor for KeywordParser {
    fn extract(&self, name: &str) -> NameMetadata {
        let mut metadata = NameMetadata::default();

        let stem = match name.rfind('.') {
            Some(dot) => {
                metadata.extension = Some(name[dot + 1..].to_string());
                &name[..dot]
            }
            None => name,
        };

        let parts: Vec<&str> = stem.split('-').collect();
        metadata.core_name = parts[0].trim().to_string();
        if parts.len() == 1 {
            return metadata;
        }
        if parts.len() > 2 {
            metadata.description = parts[2..].join("-").trim().to_string();
        }

        let collapsed = COLLAPSE_WHITESPACE_REGEX.replace_all(parts[1], " ");
        let mut components = collapsed.trim().to_string();
        let groups: Vec<String> = KEY_VALUE_REGEX
            .find_iter(&components)
            .map(|m| m.as_str().to_string())
            .collect();

        for group in groups {
            components = components.replace(&group, "");
            let inner = group.replace(['(', ')'], "");
            let mut words = inner.split(' ');
            let key = words.next().unwrap_or_default().to_string();
            let value = words.collect::<Vec<_>>().join(" ");
            match metadata.key_values.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => metadata.key_values.push((key, value)),
            }
        }

        metadata.keywords = components
            .trim()
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(ToString::to_string)
            .collect();
        metadata
    }
}
