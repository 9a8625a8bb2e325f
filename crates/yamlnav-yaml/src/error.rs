//! Error types for YAML parsing with source locations.

use crate::SourceInfo;
use thiserror::Error;

/// Result type alias for yamlnav-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during YAML parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// YAML syntax error
    #[error("Parse error: {message}{}", fmt_location(.location))]
    ParseError {
        message: String,
        location: Option<SourceInfo>,
    },

    /// Unexpected end of input
    #[error("Unexpected end of input{}", fmt_location(.location))]
    UnexpectedEof { location: Option<SourceInfo> },

    /// Invalid YAML structure
    #[error("Invalid YAML structure: {message}{}", fmt_location(.location))]
    InvalidStructure {
        message: String,
        location: Option<SourceInfo>,
    },
}

fn fmt_location(location: &Option<SourceInfo>) -> String {
    match location {
        Some(loc) => format!(" at line {}, column {}", loc.line, loc.col),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location() {
        let err = Error::ParseError {
            message: "found unknown anchor".into(),
            location: Some(SourceInfo::new(None, 12, 2, 6, 0)),
        };
        assert_eq!(
            err.to_string(),
            "Parse error: found unknown anchor at line 2, column 6"
        );
    }

    #[test]
    fn display_without_location() {
        let err = Error::UnexpectedEof { location: None };
        assert_eq!(err.to_string(), "Unexpected end of input");
    }
}
