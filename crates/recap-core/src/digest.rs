//! Digest assembly and create-or-replace persistence
//!
//! A digest is a pure function of the notes in its bucket: every run rebuilds
//! it from scratch and replaces whatever file sits at its path.

use serde::Serialize;

use crate::clean::clean;
use crate::error::Result;
use crate::period::PeriodKey;
use crate::store::{join_path, FileStore, NoteFile};

/// File name pattern for a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingTemplate {
    /// `2024-01.md`, `2024-W10.md`
    Period,
    /// `2024-W10 Summary.md`
    PeriodSummary,
}

impl NamingTemplate {
    pub fn render(&self, key: &PeriodKey) -> String {
        match self {
            NamingTemplate::Period => format!("{}.md", key),
            NamingTemplate::PeriodSummary => format!("{} Summary.md", key),
        }
    }
}

/// How note text enters a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Boilerplate stripped
    Cleaned,
    /// Full file text as stored
    Raw,
}

/// Whether a write created the digest or replaced an earlier one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Created,
    Replaced,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteOutcome::Created => "created",
            WriteOutcome::Replaced => "replaced",
        }
    }
}

/// Join note texts, each followed by a blank line
pub fn concatenate<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts.into_iter().fold(String::new(), |mut acc, part| {
        acc.push_str(part.as_ref());
        acc.push_str("\n\n");
        acc
    })
}

/// Read every file of a bucket in order and concatenate them
pub fn assemble(store: &impl FileStore, files: &[NoteFile], mode: ContentMode) -> Result<String> {
    let mut parts = Vec::with_capacity(files.len());
    for file in files {
        let raw = store.read_text(file)?;
        parts.push(match mode {
            ContentMode::Cleaned => clean(&raw),
            ContentMode::Raw => raw,
        });
    }
    Ok(concatenate(parts))
}

/// Writes digests into a store
pub struct DigestWriter<'a, S: FileStore> {
    store: &'a S,
}

impl<'a, S: FileStore> DigestWriter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Path a digest for `key` lands at
    pub fn path_for(key: &PeriodKey, output_folder: &str, template: NamingTemplate) -> String {
        join_path(output_folder, &template.render(key))
    }

    /// Create the digest file, or replace its entire content if it exists
    pub fn write(
        &self,
        key: &PeriodKey,
        content: &str,
        output_folder: &str,
        template: NamingTemplate,
    ) -> Result<(String, WriteOutcome)> {
        let path = Self::path_for(key, output_folder, template);
        let outcome = if self.store.exists(&path)? {
            self.store.overwrite_file(&path, content)?;
            WriteOutcome::Replaced
        } else {
            self.store.create_file(&path, content)?;
            WriteOutcome::Created
        };
        tracing::info!(path = %path, outcome = ?outcome, bytes = content.len(), "wrote digest");
        Ok((path, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{MonthKey, WeekKey};
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn week(s: &str) -> PeriodKey {
        WeekKey::containing(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()).into()
    }

    #[test]
    fn test_render_names() {
        let month: PeriodKey = MonthKey { year: 2024, month: 1 }.into();
        assert_eq!(NamingTemplate::Period.render(&month), "2024-01.md");
        assert_eq!(NamingTemplate::Period.render(&week("2024-03-12")), "2024-W10.md");
        assert_eq!(
            NamingTemplate::PeriodSummary.render(&week("2024-03-12")),
            "2024-W10 Summary.md"
        );
    }

    #[test]
    fn test_concatenate() {
        assert_eq!(concatenate(["A", "B"]), "A\n\nB\n\n");
        assert_eq!(concatenate(Vec::<String>::new()), "");
    }

    #[test]
    fn test_assemble_modes() {
        let store = MemoryStore::new()
            .with_file("2024-01-05.md", "---\na: 1\n---\n\nFirst")
            .with_file("2024-01-20.md", "Second\n");
        let files = crate::store::FileStore::list_files(&store, "", "md").unwrap();

        assert_eq!(
            assemble(&store, &files, ContentMode::Cleaned).unwrap(),
            "First\n\nSecond\n\n"
        );
        assert_eq!(
            assemble(&store, &files, ContentMode::Raw).unwrap(),
            "---\na: 1\n---\n\nFirst\n\nSecond\n\n\n"
        );
    }

    #[test]
    fn test_write_creates_then_replaces() {
        let store = MemoryStore::new();
        let writer = DigestWriter::new(&store);
        let key: PeriodKey = MonthKey { year: 2024, month: 1 }.into();

        let (path, outcome) = writer.write(&key, "one", "Recaps", NamingTemplate::Period).unwrap();
        assert_eq!(path, "Recaps/2024-01.md");
        assert_eq!(outcome, WriteOutcome::Created);

        let (_, outcome) = writer.write(&key, "two", "Recaps", NamingTemplate::Period).unwrap();
        assert_eq!(outcome, WriteOutcome::Replaced);
        assert_eq!(store.get("Recaps/2024-01.md").as_deref(), Some("two"));
    }
}
