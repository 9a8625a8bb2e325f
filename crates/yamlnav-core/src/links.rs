//! Clickable import paths.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::imports::extract_import_entries;
use crate::resolver::ReferenceResolver;
use crate::source::FileSource;
use crate::syntax::SyntaxLocator;
use crate::text::range_from_offsets;
use crate::types::Range;

/// An import path in the header that names an existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLink {
    /// Where the path is written, quotes included.
    pub range: Range,
    /// The path as declared.
    pub path: String,
    /// The file it resolves to.
    pub target: PathBuf,
}

impl<S: FileSource, L: SyntaxLocator> ReferenceResolver<S, L> {
    /// Links for every declared import whose file exists, in declaration order.
    pub fn import_links(&self, doc: &Document) -> Vec<ImportLink> {
        let text = doc.content();
        extract_import_entries(text, &self.config().import_key)
            .into_iter()
            .filter_map(|entry| {
                let target = self.candidate_path(doc, &entry.path);
                self.source().exists(&target).then(|| ImportLink {
                    range: range_from_offsets(text, entry.start, entry.end),
                    path: entry.path,
                    target,
                })
            })
            .collect()
    }
}
