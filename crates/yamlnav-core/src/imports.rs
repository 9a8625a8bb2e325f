//! Import declarations in a document header.
//!
//! The header is everything before the first line consisting of three or more
//! dashes. Only the header is parsed, so an `import` key in a later document of
//! the stream is never seen.

use regex::Regex;
use serde::{Deserialize, Serialize};
use yamlnav_yaml::YamlWithSourceInfo;

use crate::config::DEFAULT_IMPORT_KEY;
use crate::text::bom_len;

/// One declared import path and where it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    /// The path string as declared, quotes already removed by the YAML parser.
    pub path: String,
    /// Byte offset of the scalar in the document, quotes included.
    pub start: usize,
    /// Byte offset one past the end of the scalar.
    pub end: usize,
}

/// Text before the first separator line, or the whole text when there is none.
///
/// A leading byte order mark stays in the header but does not hide a
/// separator on the first line.
pub fn split_header(text: &str) -> &str {
    // Built per call; `R` makes `$` stop before `\r\n` as well as `\n`.
    let Ok(separator) = Regex::new(r"(?mR)^-{3,}\s*$") else {
        return text;
    };
    let start = bom_len(text);
    match separator.find(&text[start..]) {
        Some(found) => &text[..start + found.start()],
        None => text,
    }
}

/// Parse the header and return the entries declared under `key`.
///
/// A string value yields one entry; a sequence yields its string elements in
/// order. Any other shape, an absent key or an empty header yields no entries.
///
/// # Errors
///
/// Returns the parse error when the header is not valid YAML.
pub fn parse_import_header(text: &str, key: &str) -> yamlnav_yaml::Result<Vec<ImportEntry>> {
    let header = split_header(text);
    let body = &header[bom_len(header)..];
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let lead = header.len() - body.trim_start().len();

    let root = yamlnav_yaml::parse(trimmed)?;
    let Some(value) = root.get_hash_value(key) else {
        return Ok(Vec::new());
    };

    let entry = |node: &YamlWithSourceInfo| {
        node.as_str_spanned().map(|(path, info)| ImportEntry {
            path: path.to_string(),
            start: lead + info.offset,
            end: lead + info.end_offset(),
        })
    };

    if let Some(items) = value.as_array() {
        return Ok(items.iter().filter_map(entry).collect());
    }
    Ok(entry(value).into_iter().collect())
}

/// Import entries declared under `key`, or none when the header can't be parsed.
pub fn extract_import_entries(text: &str, key: &str) -> Vec<ImportEntry> {
    match parse_import_header(text, key) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::debug!(%error, "Header is not valid YAML, treating as no imports");
            Vec::new()
        }
    }
}

/// Import paths declared under the `import` key, in declaration order.
pub fn extract_import_paths(text: &str) -> Vec<String> {
    extract_import_entries(text, DEFAULT_IMPORT_KEY)
        .into_iter()
        .map(|entry| entry.path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_import_key() {
        assert!(extract_import_paths("name: demo\nversion: 2\n").is_empty());
    }

    #[test]
    fn scalar_import() {
        assert_eq!(extract_import_paths("import: \"a.yaml\""), vec!["a.yaml"]);
    }

    #[test]
    fn sequence_import_keeps_order() {
        assert_eq!(
            extract_import_paths("import: [\"a.yaml\", \"b.yaml\"]"),
            vec!["a.yaml", "b.yaml"]
        );
        assert_eq!(
            extract_import_paths("import:\n  - b.yaml\n  - a.yaml\n"),
            vec!["b.yaml", "a.yaml"]
        );
    }

    #[test]
    fn non_string_elements_are_dropped() {
        assert_eq!(
            extract_import_paths("import: [a.yaml, 42, true, '7', {x: y}]"),
            vec!["a.yaml", "7"]
        );
    }

    #[test]
    fn float_like_words_are_paths() {
        assert_eq!(
            extract_import_paths("import: [inf, Infinity, nan, NaN, b.yaml, 1.5]"),
            vec!["inf", "Infinity", "nan", "NaN", "b.yaml"]
        );
        assert_eq!(extract_import_paths("import: inf"), vec!["inf"]);
    }

    #[test]
    fn other_shapes_are_empty() {
        assert!(extract_import_paths("import: 42").is_empty());
        assert!(extract_import_paths("import: {a: b.yaml}").is_empty());
        assert!(extract_import_paths("import:").is_empty());
        assert!(extract_import_paths("- import").is_empty());
    }

    #[test]
    fn only_header_is_parsed() {
        let text = "name: demo\n---\nimport: b.yaml\n";
        assert!(extract_import_paths(text).is_empty());
    }

    #[test]
    fn separator_may_be_longer_with_trailing_space() {
        let text = "import: a.yaml\n-----   \r\nimport: b.yaml\n";
        assert_eq!(split_header(text), "import: a.yaml\n");
        assert_eq!(extract_import_paths(text), vec!["a.yaml"]);
    }

    #[test]
    fn indented_dashes_are_not_a_separator() {
        assert_eq!(split_header("a: 1\n ---\nb: 2"), "a: 1\n ---\nb: 2");
    }

    #[test]
    fn file_without_separator_is_all_header() {
        let text = "import: a.yaml\nshared: &shared {x: 1}\n";
        assert_eq!(split_header(text), text);
        assert_eq!(extract_import_paths(text), vec!["a.yaml"]);
    }

    #[test]
    fn leading_separator_means_empty_header() {
        assert!(extract_import_paths("---\nimport: a.yaml\n").is_empty());
    }

    #[test]
    fn invalid_header_is_empty() {
        assert!(extract_import_paths("import: [a.yaml\n").is_empty());
        assert!(parse_import_header("import: [a.yaml\n", "import").is_err());
    }

    #[test]
    fn entries_carry_document_offsets() {
        let text = "\n\nimport:\n  - a.yaml\n  - 'b.yaml'\n---\nref: *x\n";
        let entries = extract_import_entries(text, "import");
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].path, "a.yaml");
        assert_eq!(&text[entries[0].start..entries[0].end], "a.yaml");
        assert_eq!(entries[1].path, "b.yaml");
        assert_eq!(&text[entries[1].start..entries[1].end], "'b.yaml'");
    }

    #[test]
    fn byte_order_mark_before_header() {
        let text = "\u{feff}import: c.yaml\n---\nref: *shared\n";
        let entries = parse_import_header(text, "import").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "c.yaml");
        assert_eq!(&text[entries[0].start..entries[0].end], "c.yaml");

        assert!(extract_import_paths("\u{feff}---\nimport: c.yaml\n").is_empty());
    }

    #[test]
    fn custom_key() {
        let entries = extract_import_entries("include: x.yaml\nimport: y.yaml", "include");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "x.yaml");
    }
}
