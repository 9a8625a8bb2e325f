//! YAML value with source location tracking.

use crate::SourceInfo;
use yaml_rust2::Yaml;

/// A YAML value together with the span it was parsed from.
///
/// Stores an owned `Yaml` value next to a parallel `Children` structure that
/// carries the span of every child, so callers can read plain values through
/// `yaml` and still point back into the source text.
#[derive(Debug, Clone)]
pub struct YamlWithSourceInfo {
    /// The complete yaml-rust2 value (owned).
    pub yaml: Yaml,

    /// Source location for this node.
    pub source_info: SourceInfo,

    children: Children,
}

/// Source-tracked children of a YAML node, mirroring `yaml`.
#[derive(Debug, Clone)]
enum Children {
    None,
    Array(Vec<YamlWithSourceInfo>),
    Hash(Vec<YamlHashEntry>),
}

/// A key-value pair in a YAML mapping with source tracking.
#[derive(Debug, Clone)]
pub struct YamlHashEntry {
    pub key: YamlWithSourceInfo,
    pub value: YamlWithSourceInfo,

    /// Source location of the entire entry (key start to value end)
    pub entry_span: SourceInfo,
}

impl YamlWithSourceInfo {
    pub fn new_scalar(yaml: Yaml, source_info: SourceInfo) -> Self {
        Self {
            yaml,
            source_info,
            children: Children::None,
        }
    }

    pub fn new_array(yaml: Yaml, source_info: SourceInfo, items: Vec<YamlWithSourceInfo>) -> Self {
        Self {
            yaml,
            source_info,
            children: Children::Array(items),
        }
    }

    pub fn new_hash(yaml: Yaml, source_info: SourceInfo, entries: Vec<YamlHashEntry>) -> Self {
        Self {
            yaml,
            source_info,
            children: Children::Hash(entries),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.children, Children::None)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.children, Children::Array(_))
    }

    pub fn is_hash(&self) -> bool {
        matches!(self.children, Children::Hash(_))
    }

    pub fn as_array(&self) -> Option<&[YamlWithSourceInfo]> {
        match &self.children {
            Children::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&[YamlHashEntry]> {
        match &self.children {
            Children::Hash(entries) => Some(entries),
            _ => None,
        }
    }

    /// The string content of a scalar string node, with its span.
    ///
    /// Returns `None` for anything that is not a `Yaml::String`, including
    /// plain scalars typed as numbers, booleans or null.
    pub fn as_str_spanned(&self) -> Option<(&str, &SourceInfo)> {
        match &self.yaml {
            Yaml::String(s) if self.is_scalar() => Some((s.as_str(), &self.source_info)),
            _ => None,
        }
    }

    /// Get a value from a hash by key (string comparison).
    ///
    /// A key repeated in the same mapping resolves to its last occurrence, the
    /// way a loaded `Yaml::Hash` would. `None` if this is not a hash or the key
    /// is absent.
    pub fn get_hash_value(&self, key: &str) -> Option<&YamlWithSourceInfo> {
        self.as_hash()?
            .iter()
            .rev()
            .find(|entry| entry.key.yaml.as_str() == Some(key))
            .map(|entry| &entry.value)
    }

    /// Number of children (array length or hash entry count).
    pub fn len(&self) -> usize {
        match &self.children {
            Children::None => 0,
            Children::Array(items) => items.len(),
            Children::Hash(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
