//! yamlnav Language Server Protocol implementation.
//!
//! This crate exposes `yamlnav-core` navigation through the tower-lsp
//! framework: go-to-definition on aliases and import paths, and document
//! links for the import header.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                         yamlnav-lsp                           │
//! │        tower-lsp wrapper, JSON-RPC/stdio, `yamlnav-lsp`       │
//! │                                                               │
//! │  ┌─────────────┐  ┌─────────────┐  ┌───────────────────────┐  │
//! │  │  server.rs  │  │ convert.rs  │  │    capabilities.rs    │  │
//! │  │LanguageServer│ │ Core ↔ LSP  │  │ Capability negotiation│  │
//! │  └──────┬──────┘  └──────┬──────┘  └───────────────────────┘  │
//! │         │   overlay.rs   │                                    │
//! │         └────────────────┴─────────────────┐                  │
//! │                                            │                  │
//! │  ┌─────────────────────────────────────────▼───────────────┐  │
//! │  │                     yamlnav-core                        │  │
//! │  │        (Transport-agnostic resolution engine)           │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```bash
//! yamlnav-lsp --stdio
//! ```
//!
//! Or programmatically:
//!
//! ```rust,ignore
//! yamlnav_lsp::run_server().await;
//! ```

pub mod capabilities;
pub mod convert;
pub mod overlay;
pub mod server;

pub use server::run_server;
