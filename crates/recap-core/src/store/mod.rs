//! File store contract for recap
//!
//! Paths are vault-relative and `/`-separated (`Journal/2024-01-05.md`).
//! Notes are discovered fresh on every call; nothing is cached between
//! recap runs.

pub mod fs;
pub mod memory;

use serde::Serialize;

use crate::error::Result;

pub use fs::FsStore;
pub use memory::MemoryStore;

/// A note file discovered in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NoteFile {
    /// Vault-relative path, used as the storage key
    pub path: String,
    /// File name including extension
    pub name: String,
    /// Extension without the dot
    pub extension: String,
}

impl NoteFile {
    /// Build a note handle from a vault-relative path
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        let extension = match name.rfind('.') {
            Some(pos) if pos > 0 => name[pos + 1..].to_string(),
            _ => String::new(),
        };
        Self {
            path,
            name,
            extension,
        }
    }
}

/// Storage operations the recap flows depend on
pub trait FileStore {
    /// All files under `prefix` whose extension equals `extension`
    fn list_files(&self, prefix: &str, extension: &str) -> Result<Vec<NoteFile>>;

    /// Full text content of a note
    fn read_text(&self, file: &NoteFile) -> Result<String>;

    /// Whether `path` denotes an existing file
    fn exists(&self, path: &str) -> Result<bool>;

    /// Create a new file at `path`
    fn create_file(&self, path: &str, content: &str) -> Result<()>;

    /// Replace the content of an existing file
    fn overwrite_file(&self, path: &str, content: &str) -> Result<()>;
}

/// Folder-aware prefix test: `""` matches everything, otherwise the path must
/// be the prefix itself or live underneath it.
pub fn path_in_folder(path: &str, folder: &str) -> bool {
    let folder = normalize_folder(folder);
    if folder.is_empty() {
        return true;
    }
    path == folder
        || path
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Trim surrounding slashes and whitespace from a configured folder
pub fn normalize_folder(folder: &str) -> &str {
    folder.trim().trim_matches('/')
}

/// Join a configured folder and a file name into a vault-relative path
pub fn join_path(folder: &str, name: &str) -> String {
    let folder = normalize_folder(folder);
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}
