//! Anchor definition search.
//!
//! Anchors are found textually: the first `&name` that is not followed by
//! another identifier character wins, regardless of YAML structure. This lets
//! a file be searched even when it does not parse.

use regex::Regex;

use crate::text::offset_to_position;
use crate::types::Position;

/// Byte offset of the first `&name` in `text`.
///
/// The match must end at the end of the text or before a character that can't
/// continue an anchor name (anything but alphanumerics, `_` and `-`). This is
/// stricter than a word boundary: `&shared-x` does not define `shared`.
pub fn find_anchor_offset(text: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let pattern = format!(r"&{}(?:[^\w-]|$)", regex::escape(name));
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(error) => {
            tracing::warn!(%error, name, "Could not build anchor pattern");
            return None;
        }
    };
    regex.find(text).map(|found| found.start())
}

/// Position of the first `&name` definition in `text`.
pub fn locate_anchor(text: &str, name: &str) -> Option<Position> {
    find_anchor_offset(text, name).map(|offset| offset_to_position(text, offset))
}
