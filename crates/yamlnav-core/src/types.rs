//! Core types for navigation results.
//!
//! These types are designed to be:
//! - Transport-agnostic (no LSP protocol dependencies)
//! - Easily serializable to JSON (for embedding hosts)
//! - Easily convertible to `lsp-types` (for the native LSP server)
//!
//! All positions use 0-based line and character indices, matching the LSP specification.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A position in a text document, expressed as zero-based line and character offset.
///
/// Character offsets are measured in UTF-16 code units to match the LSP specification.
/// For ASCII text, this is equivalent to the character index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset (UTF-16 code units).
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line
            .cmp(&other.line)
            .then(self.character.cmp(&other.character))
    }
}

/// A range in a text document, expressed as start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Range {
    /// The range's start position (inclusive).
    pub start: Position,
    /// The range's end position (exclusive).
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range spanning a single position (zero-width).
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }
}

/// What a successful navigation points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TargetKind {
    /// The definition site `&name` of an alias `*name`.
    Anchor { name: String },
    /// A file named by an `import` declaration.
    Import,
}

/// The destination of a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    /// Absolute path of the file to open.
    pub path: PathBuf,
    /// Where to place the caret; `None` opens the file without moving it.
    pub position: Option<Position>,
    pub kind: TargetKind,
    /// Range of the clicked key/value pair in the source document.
    pub origin: Range,
}

/// Why a click produced no navigation.
///
/// The `Display` text is the diagnostic a host may log; none of these are
/// failures from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoTarget {
    #[error("Navigation requires the modifier key")]
    ModifierNotHeld,

    #[error("No key/value pair at offset {offset}")]
    NoKeyValue { offset: usize },

    #[error("Key '{key}' has no value")]
    MissingValue { key: String },

    #[error("Key '{key}' references neither an anchor nor an import")]
    UnrelatedKey { key: String },

    #[error("No path under the cursor")]
    NoToken,

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Anchor '{name}' not found in {searched} imported file(s)")]
    AnchorNotFound { name: String, searched: usize },
}

/// Outcome of resolving one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedLocation),
    NoTarget(NoTarget),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn location(&self) -> Option<&ResolvedLocation> {
        match self {
            Resolution::Found(location) => Some(location),
            Resolution::NoTarget(_) => None,
        }
    }

    pub fn no_target(&self) -> Option<&NoTarget> {
        match self {
            Resolution::Found(_) => None,
            Resolution::NoTarget(reason) => Some(reason),
        }
    }

    /// Target path, if the click resolved.
    pub fn path(&self) -> Option<&Path> {
        self.location().map(|location| location.path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ordering() {
        let p1 = Position::new(0, 5);
        let p2 = Position::new(0, 10);
        let p3 = Position::new(1, 0);

        assert!(p1 < p2);
        assert!(p2 < p3);
        assert!(p1 < p3);
    }

    #[test]
    fn no_target_messages() {
        let missing = NoTarget::FileNotFound {
            path: PathBuf::from("/p/b.yaml"),
        };
        assert_eq!(missing.to_string(), "File not found: /p/b.yaml");

        let anchor = NoTarget::AnchorNotFound {
            name: "shared".into(),
            searched: 2,
        };
        assert_eq!(
            anchor.to_string(),
            "Anchor 'shared' not found in 2 imported file(s)"
        );
    }

    #[test]
    fn location_serialization() {
        let location = ResolvedLocation {
            path: PathBuf::from("/p/b.yaml"),
            position: Some(Position::new(2, 8)),
            kind: TargetKind::Anchor {
                name: "shared".into(),
            },
            origin: Range::default(),
        };

        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["path"], "/p/b.yaml");
        assert_eq!(json["position"]["line"], 2);
        assert_eq!(json["kind"]["kind"], "anchor");
        assert_eq!(json["kind"]["name"], "shared");
    }

    #[test]
    fn resolution_accessors() {
        let found = Resolution::Found(ResolvedLocation {
            path: PathBuf::from("/p/b.yaml"),
            position: None,
            kind: TargetKind::Import,
            origin: Range::default(),
        });
        assert!(found.is_found());
        assert_eq!(found.path(), Some(Path::new("/p/b.yaml")));
        assert!(found.no_target().is_none());

        let missed = Resolution::NoTarget(NoTarget::NoToken);
        assert!(!missed.is_found());
        assert_eq!(missed.no_target(), Some(&NoTarget::NoToken));
    }
}
