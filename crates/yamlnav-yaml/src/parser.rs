//! YAML parser that builds YamlWithSourceInfo trees.

use crate::{Error, Result, SourceInfo, YamlHashEntry, YamlWithSourceInfo};
use yaml_rust2::{ScanError, Yaml};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

/// Parse YAML from a string, producing a YamlWithSourceInfo tree.
///
/// Only the first document of a multi-document stream is parsed.
///
/// # Example
///
/// ```rust
/// use yamlnav_yaml::parse;
///
/// let yaml = parse("import: [a.yaml, b.yaml]").unwrap();
/// assert!(yaml.is_hash());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid, empty, or references an anchor
/// that the same text does not define.
pub fn parse(content: &str) -> Result<YamlWithSourceInfo> {
    parse_impl(content, None)
}

/// Parse YAML from a string with an associated filename.
///
/// # Example
///
/// ```rust
/// use yamlnav_yaml::parse_file;
///
/// let yaml = parse_file("import: a.yaml", "main.yaml").unwrap();
/// assert_eq!(yaml.source_info.file.as_deref(), Some("main.yaml"));
/// ```
pub fn parse_file(content: &str, filename: &str) -> Result<YamlWithSourceInfo> {
    parse_impl(content, Some(filename))
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<YamlWithSourceInfo> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = YamlBuilder::new(content, filename);

    parser
        .load(&mut builder, false)
        .map_err(|err| builder.scan_error(&err))?;

    builder.result()
}

/// Builder that implements MarkedEventReceiver to construct YamlWithSourceInfo.
struct YamlBuilder<'a> {
    source: &'a str,
    filename: Option<String>,

    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    root: Option<YamlWithSourceInfo>,

    /// First structural problem seen; receivers cannot fail mid-stream.
    error: Option<Error>,
}

enum BuildNode {
    Sequence {
        start_marker: Marker,
        items: Vec<YamlWithSourceInfo>,
    },
    Mapping {
        start_marker: Marker,
        entries: Vec<(YamlWithSourceInfo, Option<YamlWithSourceInfo>)>,
    },
}

impl<'a> YamlBuilder<'a> {
    fn new(source: &'a str, filename: Option<&str>) -> Self {
        Self {
            source,
            filename: filename.map(|s| s.to_string()),
            stack: Vec::new(),
            root: None,
            error: None,
        }
    }

    fn result(self) -> Result<YamlWithSourceInfo> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.root.ok_or_else(|| Error::ParseError {
            message: "No YAML document found".into(),
            location: None,
        })
    }

    fn fail(&mut self, message: &str, marker: &Marker) {
        if self.error.is_none() {
            self.error = Some(Error::InvalidStructure {
                message: message.to_string(),
                location: Some(self.make_source_info(marker, 0)),
            });
        }
    }

    /// Scanner errors carry character indices; report them in bytes like
    /// every other span.
    fn scan_error(&self, err: &ScanError) -> Error {
        Error::ParseError {
            message: err.info().to_string(),
            location: Some(self.make_source_info(err.marker(), 0)),
        }
    }

    fn push_complete(&mut self, node: YamlWithSourceInfo) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(BuildNode::Sequence { items, .. }) => items.push(node),
            Some(BuildNode::Mapping { entries, .. }) => {
                let awaiting_value = matches!(entries.last(), Some((_, None)));
                if !awaiting_value {
                    entries.push((node, None));
                } else if let Some((_, value)) = entries.last_mut() {
                    *value = Some(node);
                }
            }
        }
    }

    /// Byte offset of a marker. yaml-rust2 counts characters, not bytes.
    fn byte_offset(&self, marker: &Marker) -> usize {
        let index = marker.index();
        if self.source.is_ascii() {
            return index.min(self.source.len());
        }
        self.source
            .char_indices()
            .nth(index)
            .map_or(self.source.len(), |(offset, _)| offset)
    }

    fn make_source_info(&self, marker: &Marker, len: usize) -> SourceInfo {
        let info = SourceInfo::new(
            None,
            self.byte_offset(marker),
            marker.line(),
            marker.col() + 1,
            len,
        );
        match &self.filename {
            Some(filename) => info.with_file(filename.clone()),
            None => info,
        }
    }

    fn span_between(&self, start: &Marker, end: &Marker) -> SourceInfo {
        let len = self.byte_offset(end).saturating_sub(self.byte_offset(start));
        self.make_source_info(start, len)
    }

    /// Length in bytes of the scalar as written, quotes included.
    fn scalar_source_len(&self, marker: &Marker, style: &TScalarStyle, value: &str) -> usize {
        let start = self.byte_offset(marker);
        let rest = &self.source.as_bytes()[start..];
        match style {
            TScalarStyle::SingleQuoted => {
                let mut i = 1;
                while i < rest.len() {
                    if rest[i] == b'\'' {
                        if rest.get(i + 1) == Some(&b'\'') {
                            i += 2;
                            continue;
                        }
                        return i + 1;
                    }
                    i += 1;
                }
                rest.len()
            }
            TScalarStyle::DoubleQuoted => {
                let mut i = 1;
                while i < rest.len() {
                    match rest[i] {
                        b'\\' => i += 2,
                        b'"' => return i + 1,
                        _ => i += 1,
                    }
                }
                rest.len()
            }
            _ => value.len().min(rest.len()),
        }
    }
}

impl MarkedEventReceiver for YamlBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Scalar(value, style, _anchor_id, _tag) => {
                let len = self.scalar_source_len(&marker, &style, &value);
                let source_info = self.make_source_info(&marker, len);
                let yaml = if matches!(style, TScalarStyle::Plain) {
                    parse_scalar_value(&value)
                } else {
                    Yaml::String(value)
                };
                self.push_complete(YamlWithSourceInfo::new_scalar(yaml, source_info));
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start_marker: marker,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence {
                    start_marker,
                    items,
                }) => {
                    let source_info = self.span_between(&start_marker, &marker);
                    let yaml = Yaml::Array(items.iter().map(|n| n.yaml.clone()).collect());
                    self.push_complete(YamlWithSourceInfo::new_array(yaml, source_info, items));
                }
                _ => self.fail("sequence end without matching start", &marker),
            },

            Event::MappingStart(_anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start_marker: marker,
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping {
                    start_marker,
                    entries,
                }) => {
                    let source_info = self.span_between(&start_marker, &marker);
                    let mut hash_entries = Vec::with_capacity(entries.len());
                    let mut pairs = Vec::with_capacity(entries.len());

                    for (key, value) in entries {
                        let Some(value) = value else {
                            self.fail("mapping key without value", &marker);
                            return;
                        };
                        let entry_start = key.source_info.offset;
                        let entry_span = SourceInfo::new(
                            self.filename.clone(),
                            entry_start,
                            key.source_info.line,
                            key.source_info.col,
                            value.source_info.end_offset().saturating_sub(entry_start),
                        );
                        pairs.push((key.yaml.clone(), value.yaml.clone()));
                        hash_entries.push(YamlHashEntry {
                            key,
                            value,
                            entry_span,
                        });
                    }

                    let yaml = Yaml::Hash(pairs.into_iter().collect());
                    self.push_complete(YamlWithSourceInfo::new_hash(
                        yaml,
                        source_info,
                        hash_entries,
                    ));
                }
                _ => self.fail("mapping end without matching start", &marker),
            },

            Event::Alias(_anchor_id) => {
                // Aliases are not expanded; the node keeps its position only.
                let source_info = self.make_source_info(&marker, 0);
                self.push_complete(YamlWithSourceInfo::new_scalar(Yaml::Null, source_info));
            }

            _ => {}
        }
    }
}

/// Type a plain scalar the way the YAML core schema does.
fn parse_scalar_value(value: &str) -> Yaml {
    if let Ok(i) = value.parse::<i64>() {
        return Yaml::Integer(i);
    }

    if is_float(value) {
        return Yaml::Real(value.to_string());
    }

    match value {
        "true" | "True" | "TRUE" => Yaml::Boolean(true),
        "false" | "False" | "FALSE" => Yaml::Boolean(false),
        "null" | "Null" | "NULL" | "~" | "" => Yaml::Null,
        _ => Yaml::String(value.to_string()),
    }
}

/// Floats of the YAML core schema. Rust's own parser also takes words such as
/// `inf` or `NaN`, which YAML reads as strings.
fn is_float(value: &str) -> bool {
    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    if matches!(unsigned, ".inf" | ".Inf" | ".INF") {
        return true;
    }
    if matches!(value, ".nan" | ".NaN" | ".NAN") {
        return true;
    }
    value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        && value.chars().any(|c| c.is_ascii_digit())
        && value.parse::<f64>().is_ok()
}
