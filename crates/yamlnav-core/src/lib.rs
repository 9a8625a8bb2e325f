//! Transport-agnostic navigation for YAML documents that import each other.
//!
//! Documents declare imports in their header, the part before the first `---`
//! line:
//!
//! ```yaml
//! import:
//!   - shared.yaml
//!   - ../common/base.yaml
//! ---
//! service:
//!   settings: *defaults
//! ```
//!
//! Clicking `*defaults` finds `&defaults` in the first imported file that
//! defines it; clicking an import path opens that file. This crate has no
//! editor or protocol dependencies; hosts plug in through [`FileSource`] and
//! [`NavigationSink`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          yamlnav-core                           │
//! │  ReferenceResolver ─┬─ SyntaxLocator  (tree-sitter: click → pair)│
//! │                     ├─ imports        (yamlnav-yaml: header)    │
//! │                     ├─ paths          (import → candidate file) │
//! │                     ├─ anchors        (regex: first `&name`)    │
//! │                     └─ FileSource     (filesystem / memory)     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//!                                  ▼
//!                   ┌─────────────────────────────┐
//!                   │         yamlnav-lsp         │
//!                   │      (Native LSP server)    │
//!                   └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use yamlnav_core::{Document, MemorySource, Position, ReferenceResolver};
//!
//! let source = MemorySource::with_files([("/p/b.yaml", "shared: &shared value\n")]);
//! let resolver = ReferenceResolver::new(source);
//!
//! let text = "import: b.yaml\n---\nref: *shared\n";
//! let doc = Document::new("/p/a.yaml", text);
//! let offset = text.find("*shared").unwrap();
//!
//! let resolution = resolver.resolve_click(&doc, offset, true);
//! let location = resolution.location().unwrap();
//! assert_eq!(location.path, std::path::Path::new("/p/b.yaml"));
//! assert_eq!(location.position, Some(Position::new(0, 8)));
//! ```

pub mod anchors;
pub mod config;
pub mod document;
pub mod imports;
pub mod links;
pub mod paths;
pub mod resolver;
pub mod source;
pub mod syntax;
pub mod text;
pub mod types;

pub use anchors::{find_anchor_offset, locate_anchor};
pub use config::ResolverConfig;
pub use document::{Document, DocumentStore};
pub use imports::{ImportEntry, extract_import_entries, extract_import_paths};
pub use links::ImportLink;
pub use paths::resolve_import_path;
pub use resolver::{NavigationSink, ReferenceResolver};
pub use source::{FileSource, FileSystemSource, MemorySource, SourceError};
pub use syntax::{KeyValueAt, SyntaxLocator, TreeSitterLocator};
pub use text::{offset_to_position, position_to_offset};
pub use types::{NoTarget, Position, Range, Resolution, ResolvedLocation, TargetKind};
