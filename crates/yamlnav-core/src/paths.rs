//! Import path resolution.

use std::path::{Component, Path, PathBuf};

/// Strip the decorations an import string may carry: one leading `./` and
/// one layer of matching single or double quotes, in that order.
pub fn clean_import_path(raw: &str) -> &str {
    let path = raw.strip_prefix("./").unwrap_or(raw);
    for quote in ['\'', '"'] {
        if path.len() >= 2 && path.starts_with(quote) && path.ends_with(quote) {
            return &path[1..path.len() - 1];
        }
    }
    path
}

/// Resolve an import string against the directory of the document that
/// declares it.
///
/// An absolute import replaces the base directory. `.` and `..` segments are
/// collapsed lexically; symlinks are left to [`crate::FileSource::canonicalize`].
/// Never fails: a path that names nothing simply won't be found later.
pub fn resolve_import_path(base_directory: &Path, raw_path: &str) -> PathBuf {
    normalize_lexically(&base_directory.join(clean_import_path(raw_path)))
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
