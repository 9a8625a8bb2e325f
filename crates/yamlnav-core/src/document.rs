//! Document abstraction for navigation queries.
//!
//! A document is an immutable snapshot of the text being edited plus the
//! directory its imports are resolved against. Hosts build one per query; the
//! LSP server keeps the latest snapshot of each open file in a
//! [`DocumentStore`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A YAML document as seen by the resolver.
#[derive(Debug, Clone)]
pub struct Document {
    /// Directory that import paths are relative to.
    directory: PathBuf,
    /// Backing file, when the host knows it.
    path: Option<PathBuf>,
    content: String,
    /// Version number for tracking changes (optional, used by LSP).
    version: Option<i32>,
}

impl Document {
    /// Create a document for the file at `path`.
    ///
    /// Imports resolve against the file's parent directory.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let directory = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            directory,
            path: Some(path),
            content: content.into(),
            version: None,
        }
    }

    /// Create a document known only by the directory it lives in.
    pub fn in_directory(directory: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            path: None,
            content: content.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    /// Replace the content, keeping the location.
    pub fn set_content_with_version(&mut self, content: impl Into<String>, version: i32) {
        self.content = content.into();
        self.version = Some(version);
    }
}

/// Open documents keyed by URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or replace a document.
    pub fn open(&mut self, uri: impl Into<String>, document: Document) {
        self.documents.insert(uri.into(), document);
    }

    /// Update a document's content. Unknown URIs are ignored.
    pub fn change(&mut self, uri: &str, content: impl Into<String>, version: i32) {
        if let Some(doc) = self.documents.get_mut(uri) {
            doc.set_content_with_version(content, version);
        }
    }

    pub fn close(&mut self, uri: &str) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_from_file_path() {
        let doc = Document::new("/p/a.yaml", "import: b.yaml");
        assert_eq!(doc.directory(), Path::new("/p"));
        assert_eq!(doc.path(), Some(Path::new("/p/a.yaml")));
        assert_eq!(doc.content(), "import: b.yaml");
        assert_eq!(doc.version(), None);
    }

    #[test]
    fn document_from_directory() {
        let doc = Document::in_directory("/p", "ref: *x").with_version(3);
        assert_eq!(doc.directory(), Path::new("/p"));
        assert_eq!(doc.path(), None);
        assert_eq!(doc.version(), Some(3));
    }

    #[test]
    fn document_store_lifecycle() {
        let mut store = DocumentStore::new();

        store.open("file:///p/a.yaml", Document::new("/p/a.yaml", "a: 1"));
        store.open("file:///p/b.yaml", Document::new("/p/b.yaml", "b: 2"));
        assert_eq!(store.len(), 2);

        store.change("file:///p/a.yaml", "a: 2", 2);
        let a = store.get("file:///p/a.yaml").unwrap();
        assert_eq!(a.content(), "a: 2");
        assert_eq!(a.version(), Some(2));
        assert_eq!(a.directory(), Path::new("/p"));

        store.close("file:///p/a.yaml");
        assert_eq!(store.len(), 1);
        assert!(!store.contains("file:///p/a.yaml"));
        assert!(store.contains("file:///p/b.yaml"));
    }
}
