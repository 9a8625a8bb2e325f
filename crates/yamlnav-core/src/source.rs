//! Reading candidate files.
//!
//! The resolver never touches the filesystem directly. Hosts hand it a
//! [`FileSource`], which lets editors serve unsaved buffers and lets tests run
//! against an in-memory tree.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::text::BYTE_ORDER_MARK;

/// Why a file could not be read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Access to the text of files by path.
pub trait FileSource {
    /// Read a whole file as text.
    fn read_to_string(&self, path: &Path) -> Result<String, SourceError>;

    /// Whether `path` names an existing file.
    fn exists(&self, path: &Path) -> bool;

    /// The canonical form of an already normalized path.
    ///
    /// The default returns the path unchanged.
    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn read_to_string(&self, path: &Path) -> Result<String, SourceError> {
        (**self).read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        (**self).canonicalize(path)
    }
}

/// [`FileSource`] over the local filesystem.
///
/// Invalid UTF-8 is replaced rather than rejected; anchor search only needs
/// the ASCII structure of the file. A leading byte order mark is dropped so
/// offsets and positions match what editors show.
#[derive(Debug, Clone, Default)]
pub struct FileSystemSource;

impl FileSource for FileSystemSource {
    fn read_to_string(&self, path: &Path) -> Result<String, SourceError> {
        match std::fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                Ok(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text).to_string())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.to_path_buf()))
            }
            Err(source) => Err(SourceError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Resolves symlinks when the file exists, otherwise keeps `path`.
    fn canonicalize(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

/// [`FileSource`] serving files from an in-memory map.
///
/// Useful for testing and for hosts that already hold file contents.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous content at the same path.
    pub fn add(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> &mut Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Create a source with the given files.
    pub fn with_files(
        files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<String>)>,
    ) -> Self {
        let mut source = Self::new();
        for (path, content) in files {
            source.add(path, content);
        }
        source
    }
}

impl FileSource for MemorySource {
    fn read_to_string(&self, path: &Path) -> Result<String, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
