//! EntryLister - filtered, ordered listing of one directory level

use std::fs;
use std::io;

use ignore::WalkBuilder;
use tracing::{debug, trace};

use crate::error::ListError;
use crate::options::Options;
use crate::path::ResolvedPath;

use super::entry::{DirectoryListing, Entry};
use super::order;

/// Lists the immediate children of a directory according to [`Options`].
pub struct EntryLister<'a> {
    options: &'a Options,
}

impl<'a> EntryLister<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// List `dir`: synthetic entries, dotfile filter, ordering, reversal.
    pub fn list(&self, dir: &ResolvedPath) -> Result<DirectoryListing, ListError> {
        let io_error = |source: io::Error| ListError::Io {
            path: dir.display_name.clone(),
            source,
        };

        let current = fs::metadata(&dir.path).map_err(io_error)?;

        let mut entries = Vec::new();
        if self.options.all {
            let parent_path = dir.path.parent().unwrap_or(&dir.path).to_path_buf();
            let parent = fs::metadata(&parent_path).map_err(io_error)?;
            entries.push(Entry::synthetic(dir.path.clone(), ".", current));
            entries.push(Entry::synthetic(parent_path, "..", parent));
        }

        entries.extend(self.read_children(dir)?);

        if self.options.sort_by_mod_time {
            order::sort_by_mod_time(&mut entries);
        } else if self.options.all {
            order::sort_by_name(&mut entries);
        }

        if self.options.reverse {
            order::reverse(&mut entries);
        }

        debug!(dir = %dir.display_name, count = entries.len(), "listed directory");
        Ok(DirectoryListing::new(entries))
    }

    /// A one-entry listing for a file operand, named by its display name.
    pub fn single(&self, file: &ResolvedPath) -> Result<DirectoryListing, ListError> {
        let metadata = fs::symlink_metadata(&file.path).map_err(|source| ListError::Io {
            path: file.display_name.clone(),
            source,
        })?;
        let entry = Entry::new(file.path.clone(), file.display_name.clone(), metadata);
        Ok(DirectoryListing::new(vec![entry]))
    }

    /// Immediate children in enumeration order, dotfiles pruned unless `all`.
    fn read_children(&self, dir: &ResolvedPath) -> Result<Vec<Entry>, ListError> {
        let show_all = self.options.all;
        let walker = WalkBuilder::new(&dir.path)
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(1))
            .filter_entry(move |entry| {
                if show_all || entry.depth() == 0 {
                    return true;
                }
                let hidden = entry.file_name().to_string_lossy().starts_with('.');
                if hidden {
                    trace!(path = %entry.path().display(), "pruned hidden entry");
                }
                !hidden
            })
            .build();

        let mut children = Vec::new();
        for result in walker {
            let entry = result.map_err(|err| walk_error(dir, err))?;
            if entry.depth() == 0 {
                continue;
            }
            let metadata = entry.metadata().map_err(|err| walk_error(dir, err))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            children.push(Entry::new(entry.into_path(), name, metadata));
        }
        Ok(children)
    }
}

fn walk_error(dir: &ResolvedPath, err: ignore::Error) -> ListError {
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    ListError::Io {
        path: dir.display_name.clone(),
        source,
    }
}
