//! Click resolution.
//!
//! [`ReferenceResolver`] turns a click in a document into a navigation target.
//! Two kinds of click navigate:
//!
//! - on a pair whose value is an alias `*name`: the imports declared in the
//!   document header are searched in order for the first `&name`;
//! - on a pair whose key is the import key: the path under the cursor is
//!   opened.
//!
//! Everything else resolves to a [`NoTarget`] reason. Nothing is cached;
//! every click re-reads the files it needs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::anchors::locate_anchor;
use crate::config::ResolverConfig;
use crate::document::Document;
use crate::imports::extract_import_entries;
use crate::paths::resolve_import_path;
use crate::source::{FileSource, SourceError};
use crate::syntax::{SyntaxLocator, TreeSitterLocator};
use crate::text::range_from_offsets;
use crate::types::{NoTarget, Position, Resolution, ResolvedLocation, TargetKind};

/// Receives the outcome of a navigation.
pub trait NavigationSink {
    /// Open a file without moving the caret.
    fn open_file(&mut self, path: &Path);

    /// Open a file and place the caret at `position`.
    fn open_file_at(&mut self, path: &Path, position: Position);

    /// The click led nowhere. Ignored unless overridden.
    fn no_target(&mut self, _reason: &NoTarget) {}
}

impl Resolution {
    /// Report this outcome to `sink`.
    pub fn dispatch(&self, sink: &mut (impl NavigationSink + ?Sized)) {
        match self {
            Resolution::Found(location) => match location.position {
                Some(position) => sink.open_file_at(&location.path, position),
                None => sink.open_file(&location.path),
            },
            Resolution::NoTarget(reason) => sink.no_target(reason),
        }
    }
}

/// Resolves clicks against a [`FileSource`].
#[derive(Debug, Clone)]
pub struct ReferenceResolver<S, L = TreeSitterLocator> {
    source: S,
    locator: L,
    config: ResolverConfig,
}

impl<S: FileSource> ReferenceResolver<S> {
    /// Resolver using the tree-sitter locator and default configuration.
    pub fn new(source: S) -> Self {
        Self::with_locator(source, TreeSitterLocator::new())
    }
}

impl<S: FileSource, L: SyntaxLocator> ReferenceResolver<S, L> {
    pub fn with_locator(source: S, locator: L) -> Self {
        Self {
            source,
            locator,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve a click at byte `offset` of `doc`.
    ///
    /// Unless the configuration says otherwise, nothing navigates while
    /// `modifier_held` is false.
    pub fn resolve_click(&self, doc: &Document, offset: usize, modifier_held: bool) -> Resolution {
        match self.try_resolve_click(doc, offset, modifier_held) {
            Ok(location) => Resolution::Found(location),
            Err(reason) => {
                tracing::debug!(%reason, offset, "No navigation target");
                Resolution::NoTarget(reason)
            }
        }
    }

    /// Resolve a click and report the outcome to `sink`.
    pub fn navigate(
        &self,
        doc: &Document,
        offset: usize,
        modifier_held: bool,
        sink: &mut (impl NavigationSink + ?Sized),
    ) -> Resolution {
        let resolution = self.resolve_click(doc, offset, modifier_held);
        resolution.dispatch(sink);
        resolution
    }

    fn try_resolve_click(
        &self,
        doc: &Document,
        offset: usize,
        modifier_held: bool,
    ) -> Result<ResolvedLocation, NoTarget> {
        if self.config.require_modifier && !modifier_held {
            return Err(NoTarget::ModifierNotHeld);
        }

        let text = doc.content();
        let pair = self
            .locator
            .key_value_at(text, offset)
            .ok_or(NoTarget::NoKeyValue { offset })?;
        let origin = range_from_offsets(text, pair.span.start, pair.span.end);
        let value = pair.value.as_deref().ok_or_else(|| NoTarget::MissingValue {
            key: pair.key.clone(),
        })?;

        if let Some(name) = value.strip_prefix('*') {
            let (path, position) = self.resolve_anchor(doc, name)?;
            return Ok(ResolvedLocation {
                path,
                position: Some(position),
                kind: TargetKind::Anchor {
                    name: name.to_string(),
                },
                origin,
            });
        }

        if pair.key == self.config.import_key {
            let token = pair.token.as_deref().ok_or(NoTarget::NoToken)?;
            let path = self.resolve_import(doc, token)?;
            return Ok(ResolvedLocation {
                path,
                position: None,
                kind: TargetKind::Import,
                origin,
            });
        }

        Err(NoTarget::UnrelatedKey { key: pair.key })
    }

    /// Find the definition of anchor `name` in the files `doc` imports.
    ///
    /// Imports are searched in declaration order and the first file containing
    /// `&name` wins. Unreadable imports are skipped.
    pub fn resolve_anchor(&self, doc: &Document, name: &str) -> Result<(PathBuf, Position), NoTarget> {
        let mut seen = HashSet::new();
        let mut searched = 0;

        for entry in extract_import_entries(doc.content(), &self.config.import_key) {
            let path = self.candidate_path(doc, &entry.path);
            if !seen.insert(path.clone()) {
                continue;
            }

            let text = match self.source.read_to_string(&path) {
                Ok(text) => text,
                Err(error @ SourceError::NotFound(_)) => {
                    tracing::info!("{error}");
                    continue;
                }
                Err(error) => {
                    tracing::warn!("{error}");
                    continue;
                }
            };
            searched += 1;

            if let Some(position) = locate_anchor(&text, name) {
                tracing::info!(
                    "Anchor '{}' found in {} at line {}, character {}",
                    name,
                    path.display(),
                    position.line,
                    position.character
                );
                return Ok((path, position));
            }
        }

        Err(NoTarget::AnchorNotFound {
            name: name.to_string(),
            searched,
        })
    }

    /// Resolve a single import path written in `doc`.
    pub fn resolve_import(&self, doc: &Document, raw_path: &str) -> Result<PathBuf, NoTarget> {
        let path = self.candidate_path(doc, raw_path);
        if self.source.exists(&path) {
            tracing::info!("Navigating to import path: {}", path.display());
            Ok(path)
        } else {
            tracing::info!("File not found at path: {}", path.display());
            Err(NoTarget::FileNotFound { path })
        }
    }

    /// Canonical path an import string of `doc` refers to.
    pub fn candidate_path(&self, doc: &Document, raw_path: &str) -> PathBuf {
        self.source
            .canonicalize(&resolve_import_path(doc.directory(), raw_path))
    }
}
