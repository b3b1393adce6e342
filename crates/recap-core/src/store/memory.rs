//! In-memory store preserving insertion order

use std::sync::{Mutex, MutexGuard};

use super::{path_in_folder, FileStore, NoteFile};
use crate::error::{RecapError, Result};

/// Files held in memory, enumerated in the order they were first added
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, builder style
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file
    pub fn insert(&self, path: &str, content: &str) {
        let mut files = self.lock();
        match files.iter_mut().find(|(p, _)| p == path) {
            Some(entry) => entry.1 = content.to_string(),
            None => files.push((path.to_string(), content.to_string())),
        }
    }

    /// Content at `path`, if present
    pub fn get(&self, path: &str) -> Option<String> {
        self.lock()
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.clone())
    }

    /// All stored paths in enumeration order
    pub fn paths(&self) -> Vec<String> {
        self.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileStore for MemoryStore {
    fn list_files(&self, prefix: &str, extension: &str) -> Result<Vec<NoteFile>> {
        Ok(self
            .lock()
            .iter()
            .map(|(path, _)| NoteFile::from_path(path.clone()))
            .filter(|f| f.extension == extension && path_in_folder(&f.path, prefix))
            .collect())
    }

    fn read_text(&self, file: &NoteFile) -> Result<String> {
        self.get(&file.path)
            .ok_or_else(|| RecapError::not_found("file", &file.path))
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.get(path).is_some())
    }

    fn create_file(&self, path: &str, content: &str) -> Result<()> {
        if self.get(path).is_some() {
            return Err(RecapError::io_operation("create", path, "file already exists"));
        }
        self.insert(path, content);
        Ok(())
    }

    fn overwrite_file(&self, path: &str, content: &str) -> Result<()> {
        if self.get(path).is_none() {
            return Err(RecapError::not_found("file", path));
        }
        self.insert(path, content);
        Ok(())
    }
}
