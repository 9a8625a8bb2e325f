//! # yamlnav-yaml
//!
//! YAML parsing with source location tracking.
//!
//! This crate provides `YamlWithSourceInfo`, which wraps `yaml-rust2::Yaml` with
//! the byte span of every node in the YAML tree. `yamlnav-core` uses it to read
//! `import` declarations out of a document header while keeping the location of
//! each declared path.
//!
//! ## Example
//!
//! ```rust
//! use yamlnav_yaml::parse;
//!
//! let yaml = parse("import: shared.yaml").unwrap();
//! let import = yaml.get_hash_value("import").unwrap();
//! assert_eq!(import.yaml.as_str(), Some("shared.yaml"));
//! assert_eq!(import.source_info.offset, 8);
//! ```

mod error;
mod parser;
mod source_info;
mod yaml_with_source_info;

pub use error::{Error, Result};
pub use parser::{parse, parse_file};
pub use source_info::SourceInfo;
pub use yaml_with_source_info::{YamlHashEntry, YamlWithSourceInfo};
