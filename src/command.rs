//! Top-level driver: resolve each path argument and list it

use std::io::{self, Write};
use std::path::PathBuf;

use termcolor::WriteColor;
use tracing::debug;

use crate::listing::{EntryLister, RecursiveWalker};
use crate::metadata::FileMetadataProvider;
use crate::options::Options;
use crate::output::{OutputConfig, Renderer, write_error};
use crate::path::{ResolvedPath, resolve};

/// Path listed when no path arguments are given.
pub const DEFAULT_PATH: &str = ".";

/// One invocation over a list of path arguments.
///
/// Each path is processed independently; an error on one is reported in
/// place and the remaining paths still run.
pub struct ListCommand<'a> {
    options: &'a Options,
    config: &'a OutputConfig,
    provider: &'a dyn FileMetadataProvider,
    cwd: PathBuf,
}

impl<'a> ListCommand<'a> {
    pub fn new(
        options: &'a Options,
        config: &'a OutputConfig,
        provider: &'a dyn FileMetadataProvider,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            options,
            config,
            provider,
            cwd: cwd.into(),
        }
    }

    /// List every path, returning the number of errors reported.
    pub fn run<W: WriteColor>(&self, paths: &[String], out: &mut W) -> io::Result<usize> {
        let paths: Vec<&str> = if paths.is_empty() {
            vec![DEFAULT_PATH]
        } else {
            paths.iter().map(String::as_str).collect()
        };
        let show_header = paths.len() > 1;

        let mut failures = 0;
        for raw in paths {
            let resolved = match resolve(raw, &self.cwd) {
                Ok(resolved) => resolved,
                Err(err) => {
                    write_error(out, &err)?;
                    failures += 1;
                    continue;
                }
            };

            if show_header {
                writeln!(out, "{}: ", resolved.display_name)?;
            }
            failures += self.list_path(&resolved, out)?;
        }

        debug!(failures, "finished");
        Ok(failures)
    }

    fn list_path<W: WriteColor>(&self, resolved: &ResolvedPath, out: &mut W) -> io::Result<usize> {
        if resolved.is_dir() && self.options.recursive {
            let walker = RecursiveWalker::new(self.options, self.config, self.provider);
            return walker.walk(resolved, out);
        }

        let lister = EntryLister::new(self.options);
        let listing = if resolved.is_dir() {
            lister.list(resolved)
        } else {
            lister.single(resolved)
        };

        match listing {
            Ok(listing) => {
                Renderer::new(self.options, self.config, self.provider).render(resolved, &listing, out)?;
                Ok(0)
            }
            Err(err) => {
                write_error(out, &err)?;
                Ok(1)
            }
        }
    }
}
