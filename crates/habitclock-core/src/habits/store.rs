use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::storage::RecordFile;

use super::{codec, normalize_name, HabitEntry};

/// The ordered habit list, persisted after every mutation.
///
/// Save failures never roll back the in-memory change; they are logged and
/// queued for [`HabitStore::take_failures`].
#[derive(Debug)]
pub struct HabitStore {
    entries: Vec<HabitEntry>,
    file: RecordFile,
}

impl HabitStore {
    /// An empty store backed by `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            file: RecordFile::new(path),
        }
    }

    /// Load the list from `path`, skipping malformed lines.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let file = RecordFile::new(path);
        let (entries, skipped) = codec::decode(&file.read());
        for bad in &skipped {
            tracing::debug!(
                path = %file.path().display(),
                line = bad.line,
                reason = bad.reason,
                "skipping malformed habit record"
            );
        }
        Self { entries, file }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entries(&self) -> &[HabitEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// First entry named `name`.
    pub fn get(&self, name: &str) -> Option<&HabitEntry> {
        self.position(name).map(|i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// True when the list is non-empty and every entry is checked.
    pub fn all_completed(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.completed_today)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append an unchecked habit. Blank names are ignored.
    ///
    /// Returns the index of the new entry.
    pub fn add(&mut self, name: &str) -> Option<usize> {
        let entry = HabitEntry::new(name).ok()?;
        self.entries.push(entry);
        self.save();
        Some(self.entries.len() - 1)
    }

    /// Rename the first entry named `old` in place, keeping its position
    /// and completion flag.
    ///
    /// Returns the normalized new name. The caller is responsible for
    /// moving the streak record along with it.
    pub fn rename(&mut self, old: &str, new: &str) -> Option<String> {
        let new = normalize_name(new).ok()?;
        let idx = self.position(old)?;
        self.entries[idx].name = new.clone();
        self.save();
        Some(new)
    }

    /// Set the completion flag on the first entry named `name`.
    ///
    /// Returns false when no entry matches.
    pub fn set_completion(&mut self, name: &str, completed: bool) -> bool {
        let Some(idx) = self.position(name) else {
            return false;
        };
        self.entries[idx].completed_today = completed;
        self.save();
        true
    }

    /// Delete the first entry named `name`.
    pub fn remove(&mut self, name: &str) -> Option<HabitEntry> {
        let idx = self.position(name)?;
        let removed = self.entries.remove(idx);
        self.save();
        Some(removed)
    }

    /// Uncheck every entry with a single save. Returns how many were checked.
    pub fn clear_completions(&mut self) -> usize {
        let mut cleared = 0;
        for entry in &mut self.entries {
            if entry.completed_today {
                entry.completed_today = false;
                cleared += 1;
            }
        }
        self.save();
        cleared
    }

    /// Rewrite the habits file from the in-memory list.
    pub fn save(&mut self) -> bool {
        self.file.write(&codec::encode(&self.entries))
    }

    pub fn take_failures(&mut self) -> Vec<PersistenceError> {
        self.file.take_failures()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}
