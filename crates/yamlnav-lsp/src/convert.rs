//! Conversion between yamlnav-core types and tower_lsp::lsp_types.

use std::path::Path;

use tower_lsp::lsp_types::{
    DocumentLink, LocationLink, Position as LspPosition, Range as LspRange, Url,
};

use yamlnav_core::{ImportLink, Position, Range, ResolvedLocation};

/// Convert a yamlnav-core Position to an lsp-types Position.
pub fn position_to_lsp(pos: &Position) -> LspPosition {
    LspPosition {
        line: pos.line,
        character: pos.character,
    }
}

/// Convert an lsp-types Position to a yamlnav-core Position.
pub fn position_from_lsp(pos: &LspPosition) -> Position {
    Position::new(pos.line, pos.character)
}

/// Convert a yamlnav-core Range to an lsp-types Range.
pub fn range_to_lsp(range: &Range) -> LspRange {
    LspRange {
        start: position_to_lsp(&range.start),
        end: position_to_lsp(&range.end),
    }
}

/// `file://` URL for a path. `None` for relative paths.
pub fn path_to_url(path: &Path) -> Option<Url> {
    Url::from_file_path(path).ok()
}

/// Convert a resolved location to a link from the clicked pair to the target.
///
/// Import targets point at the start of the file.
pub fn location_to_link(location: &ResolvedLocation) -> Option<LocationLink> {
    let target = range_to_lsp(&Range::point(location.position.unwrap_or_default()));
    Some(LocationLink {
        origin_selection_range: Some(range_to_lsp(&location.origin)),
        target_uri: path_to_url(&location.path)?,
        target_range: target,
        target_selection_range: target,
    })
}

/// Convert an import link to an lsp-types DocumentLink.
pub fn import_link_to_lsp(link: &ImportLink) -> Option<DocumentLink> {
    Some(DocumentLink {
        range: range_to_lsp(&link.range),
        target: Some(path_to_url(&link.target)?),
        tooltip: Some(link.target.display().to_string()),
        data: None,
    })
}
