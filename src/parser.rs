//! JSON parser and nested field lookup for diagnostic snapshots.

use anyhow::{Result, bail};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Location of the energy scan inside a ZHA diagnostic dump.
pub const DEFAULT_FIELD_PATH: &str = "data.energy_scan";

/// Decodes a JSON snapshot document from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid JSON document.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Ordered key segments leading from the document root to a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        DEFAULT_FIELD_PATH
            .split('.')
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl FromStr for FieldPath {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            bail!("field path '{}' contains an empty segment", s);
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Walks `path` from `root`, returning `None` as soon as a segment is missing.
///
/// Objects are indexed by key and arrays by numeric segment. A `null` found
/// anywhere along the way, including at the leaf, counts as absent.
pub fn nested_value<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |acc, key| match acc {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .filter(|v| !v.is_null())
}
