//! RecursiveWalker - depth-first listing of a directory tree

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use termcolor::WriteColor;
use tracing::debug;

use crate::error::ListError;
use crate::metadata::FileMetadataProvider;
use crate::options::Options;
use crate::output::{OutputConfig, Renderer, write_error};
use crate::path::ResolvedPath;

use super::lister::EntryLister;

/// Lists a directory and then every subdirectory, pre-order, in listing order.
///
/// Symlinked directories are never entered (entries use `lstat`), and the
/// canonical paths of the current descent chain are tracked so a directory is
/// never re-entered from below itself.
pub struct RecursiveWalker<'a> {
    lister: EntryLister<'a>,
    renderer: Renderer<'a>,
}

impl<'a> RecursiveWalker<'a> {
    pub fn new(
        options: &'a Options,
        config: &'a OutputConfig,
        provider: &'a dyn FileMetadataProvider,
    ) -> Self {
        Self {
            lister: EntryLister::new(options),
            renderer: Renderer::new(options, config, provider),
        }
    }

    /// Walk `dir`, returning how many errors were reported in the output.
    pub fn walk<W: WriteColor>(&self, dir: &ResolvedPath, out: &mut W) -> io::Result<usize> {
        let mut chain = Vec::new();
        self.walk_dir(dir, &mut chain, out)
    }

    fn walk_dir<W: WriteColor>(
        &self,
        dir: &ResolvedPath,
        chain: &mut Vec<PathBuf>,
        out: &mut W,
    ) -> io::Result<usize> {
        let canonical = fs::canonicalize(&dir.path).unwrap_or_else(|_| dir.path.clone());
        if chain.contains(&canonical) {
            debug!(dir = %dir.display_name, "directory cycle");
            let err = ListError::DirectoryCycle {
                path: dir.display_name.clone(),
            };
            write_error(out, &err)?;
            return Ok(1);
        }

        let listing = match self.lister.list(dir) {
            Ok(listing) => listing,
            Err(err) => {
                write_error(out, &err)?;
                return Ok(1);
            }
        };

        write!(out, "\n{}:\n", dir.display_name)?;
        self.renderer.render(dir, &listing, out)?;
        writeln!(out)?;

        chain.push(canonical);
        let mut failures = 0;
        for entry in listing.subdirectories() {
            let child = dir.child_dir(entry.path.clone(), &entry.name);
            failures += self.walk_dir(&child, chain, out)?;
        }
        chain.pop();

        Ok(failures)
    }
}
