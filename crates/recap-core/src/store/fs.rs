//! Filesystem-backed store rooted at a vault directory

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{path_in_folder, FileStore, NoteFile};
use crate::error::{RecapError, Result};

/// A vault on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a vault directory
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(RecapError::VaultNotFound {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Root directory of the vault
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a vault path; `..` segments are refused so
    /// every read and write stays under the root
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut full = self.root.clone();
        for part in path.split(['/', '\\']).filter(|part| !part.is_empty()) {
            if part == ".." {
                return Err(RecapError::invalid_value("vault path", path));
            }
            full.push(part);
        }
        Ok(full)
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

impl FileStore for FsStore {
    fn list_files(&self, prefix: &str, extension: &str) -> Result<Vec<NoteFile>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                RecapError::io_operation("walk", self.root.display(), e)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(rel) = self.relative(entry.path()) else {
                continue;
            };
            let file = NoteFile::from_path(rel);
            if file.extension == extension && path_in_folder(&file.path, prefix) {
                files.push(file);
            }
        }

        tracing::debug!(prefix, extension, count = files.len(), "listed notes");
        Ok(files)
    }

    fn read_text(&self, file: &NoteFile) -> Result<String> {
        let path = self.resolve(&file.path)?;
        fs::read_to_string(&path).map_err(|e| RecapError::io_operation("read", &file.path, e))
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.resolve(path)?.is_file())
    }

    fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(dir) = full.parent() {
            fs::create_dir_all(dir).map_err(|e| RecapError::io_operation("create", path, e))?;
        }
        fs::write(&full, content).map_err(|e| RecapError::io_operation("create", path, e))
    }

    fn overwrite_file(&self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(RecapError::not_found("file", path));
        }
        fs::write(&full, content).map_err(|e| RecapError::io_operation("overwrite", path, e))
    }
}
