//! File access that prefers editor buffers over the disk.

use std::path::{Path, PathBuf};

use yamlnav_core::{Document, DocumentStore, FileSource, FileSystemSource, SourceError};

use crate::convert::path_to_url;

/// [`FileSource`] serving open documents from the store and everything else
/// from the filesystem, so unsaved edits to an imported file are searched.
#[derive(Debug, Clone, Copy)]
pub struct OverlaySource<'a> {
    documents: &'a DocumentStore,
}

impl<'a> OverlaySource<'a> {
    pub fn new(documents: &'a DocumentStore) -> Self {
        Self { documents }
    }

    fn open_document(&self, path: &Path) -> Option<&'a Document> {
        let url = path_to_url(path)?;
        self.documents.get(url.as_str())
    }
}

impl FileSource for OverlaySource<'_> {
    fn read_to_string(&self, path: &Path) -> Result<String, SourceError> {
        match self.open_document(path) {
            Some(doc) => Ok(doc.content().to_string()),
            None => FileSystemSource.read_to_string(path),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.open_document(path).is_some() || FileSystemSource.exists(path)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        FileSystemSource.canonicalize(path)
    }
}
