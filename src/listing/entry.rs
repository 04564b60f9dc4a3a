//! Entries and per-directory listings

use std::fs::Metadata;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// One directory child, or a synthetic `.`/`..` entry.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub modified: SystemTime,
    pub size: u64,
    /// `lstat` data for children, `stat` data for synthetic entries
    pub metadata: Metadata,
    synthetic: bool,
}

impl Entry {
    /// Build an entry for a real directory child from its `lstat` metadata.
    pub fn new(path: PathBuf, name: String, metadata: Metadata) -> Self {
        Self::build(path, name, metadata, false)
    }

    /// Build a synthetic `.` or `..` entry.
    pub fn synthetic(path: PathBuf, name: &str, metadata: Metadata) -> Self {
        Self::build(path, name.to_string(), metadata, true)
    }

    fn build(path: PathBuf, name: String, metadata: Metadata, synthetic: bool) -> Self {
        Self {
            is_dir: metadata.is_dir(),
            modified: metadata.modified().unwrap_or(UNIX_EPOCH),
            size: metadata.len(),
            path,
            name,
            metadata,
            synthetic,
        }
    }

    /// Whether this is one of the injected `.`/`..` entries.
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn is_symlink(&self) -> bool {
        self.metadata.file_type().is_symlink()
    }
}

/// The ordered entries of one directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    pub entries: Vec<Entry>,
}

impl DirectoryListing {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Display names in listing order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Subdirectories to descend into, in listing order, excluding `.` and `..`.
    pub fn subdirectories(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| e.is_dir && !e.is_synthetic() && e.name != "." && e.name != "..")
    }
}

impl<'a> IntoIterator for &'a DirectoryListing {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
