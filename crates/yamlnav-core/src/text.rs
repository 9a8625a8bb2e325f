//! Conversion between byte offsets and line/character positions.
//!
//! Lines break at `\n`, `\r\n` and lone `\r`. Characters are counted in
//! UTF-16 code units. A byte order mark at the start of the text takes no
//! column.

use crate::types::{Position, Range};

/// U+FEFF, accepted at the start of a file.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Byte length of the byte order mark `text` starts with, if any.
pub(crate) fn bom_len(text: &str) -> usize {
    if text.starts_with(BYTE_ORDER_MARK) {
        BYTE_ORDER_MARK.len_utf8()
    } else {
        0
    }
}

/// Position of a byte offset.
///
/// The line is the number of line breaks before `offset`; the character is
/// the length of the text between the last break and `offset`. Offsets past
/// the end clamp to the end, offsets inside a multi-byte character clamp to
/// its start.
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    let mut line = 0u32;
    let mut character = 0u32;
    let mut chars = text[bom_len(text).min(end)..end].chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                character = 0;
            }
            '\n' => {
                line += 1;
                character = 0;
            }
            _ => character += c.len_utf16() as u32,
        }
    }

    Position::new(line, character)
}

/// Byte offset of a position.
///
/// Returns `None` when the line does not exist. A character past the end of
/// its line clamps to the line end.
pub fn position_to_offset(text: &str, position: Position) -> Option<usize> {
    let mut line_start = bom_len(text);
    let mut line = 0;
    let mut chars = text.char_indices().peekable();
    while line < position.line {
        let (i, c) = chars.next()?;
        match c {
            '\n' => {
                line += 1;
                line_start = i + 1;
            }
            '\r' => {
                line += 1;
                line_start = i + 1;
                if let Some(&(j, '\n')) = chars.peek() {
                    chars.next();
                    line_start = j + 1;
                }
            }
            _ => {}
        }
    }

    let mut units = 0u32;
    for (i, c) in text[line_start..].char_indices() {
        if c == '\n' || c == '\r' || units >= position.character {
            return Some(line_start + i);
        }
        units += c.len_utf16() as u32;
    }
    Some(text.len())
}

/// Range covering `start..end` byte offsets.
pub fn range_from_offsets(text: &str, start: usize, end: usize) -> Range {
    Range::new(offset_to_position(text, start), offset_to_position(text, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_on_first_line() {
        assert_eq!(offset_to_position("shared: &a", 8), Position::new(0, 8));
    }

    #[test]
    fn offset_after_two_newlines() {
        let text = "first: 1\nsecond: 2\nnode: &node1 x";
        let offset = text.find("&node1").unwrap();
        let second_newline = text.rfind('\n').unwrap();

        let position = offset_to_position(text, offset);
        assert_eq!(position.line, 2);
        assert_eq!(position.character as usize, offset - second_newline - 1);
    }

    #[test]
    fn crlf_counts_once() {
        let text = "a: 1\r\nb: 2\r\nc: &x y";
        assert_eq!(offset_to_position(text, text.find('&').unwrap()), Position::new(2, 3));
    }

    #[test]
    fn lone_carriage_return_breaks_line() {
        assert_eq!(offset_to_position("a\rb", 2), Position::new(1, 0));
    }

    #[test]
    fn characters_are_utf16_units() {
        let text = "k: \u{1F600} &x";
        let offset = text.find('&').unwrap();
        // emoji is two UTF-16 units
        assert_eq!(offset_to_position(text, offset), Position::new(0, 6));
    }

    #[test]
    fn offset_past_end_clamps() {
        assert_eq!(offset_to_position("ab\nc", 100), Position::new(1, 1));
    }

    #[test]
    fn position_round_trips_through_offset() {
        let text = "import: b.yaml\r\n---\nref: *shared\n";
        let offset = text.find("*shared").unwrap();
        let position = offset_to_position(text, offset);
        assert_eq!(position, Position::new(2, 5));
        assert_eq!(position_to_offset(text, position), Some(offset));
    }

    #[test]
    fn position_past_line_end_clamps() {
        let text = "ab\ncd";
        assert_eq!(position_to_offset(text, Position::new(0, 10)), Some(2));
        assert_eq!(position_to_offset(text, Position::new(1, 10)), Some(5));
    }

    #[test]
    fn missing_line_is_none() {
        assert_eq!(position_to_offset("one line", Position::new(3, 0)), None);
    }

    #[test]
    fn leading_byte_order_mark_takes_no_column() {
        let text = "\u{feff}shared: &shared 1\nb: 2";
        let offset = text.find('&').unwrap();
        assert_eq!(offset_to_position(text, offset), Position::new(0, 8));
        assert_eq!(offset_to_position(text, 0), Position::new(0, 0));
        assert_eq!(position_to_offset(text, Position::new(0, 8)), Some(offset));
        assert_eq!(position_to_offset(text, Position::new(0, 0)), Some(3));
        assert_eq!(position_to_offset(text, Position::new(1, 0)), text.find('b'));
    }

    #[test]
    fn range_from_byte_span() {
        let text = "a: 1\nref: *shared";
        let range = range_from_offsets(text, 5, text.len());
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(1, 12));
    }
}
