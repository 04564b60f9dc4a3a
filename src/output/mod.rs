//! Listing output
//!
//! - `config` - Output configuration types
//! - `utils` - Totals, timestamps and colored names
//! - `compact` - Space-separated names
//! - `long` - Per-entry metadata lines

mod compact;
mod config;
mod long;
mod utils;

use std::io::{self, Write};

use termcolor::WriteColor;
use tracing::debug;

use crate::error::ListError;
use crate::listing::DirectoryListing;
use crate::metadata::FileMetadataProvider;
use crate::options::Options;
use crate::path::ResolvedPath;

pub use config::{OutputConfig, TotalPolicy};
pub use long::UNAVAILABLE;
pub use utils::{TIME_FORMAT, entry_blocks, format_mod_time, logical_blocks, total_blocks};

/// Renders a directory listing in compact or long format.
pub struct Renderer<'a> {
    options: &'a Options,
    config: &'a OutputConfig,
    provider: &'a dyn FileMetadataProvider,
}

impl<'a> Renderer<'a> {
    pub fn new(
        options: &'a Options,
        config: &'a OutputConfig,
        provider: &'a dyn FileMetadataProvider,
    ) -> Self {
        Self {
            options,
            config,
            provider,
        }
    }

    /// Render `listing`, which belongs to `dir`.
    ///
    /// The long format's `total` line is only written for directories.
    pub fn render<W: WriteColor>(
        &self,
        dir: &ResolvedPath,
        listing: &DirectoryListing,
        out: &mut W,
    ) -> io::Result<()> {
        debug!(dir = %dir.display_name, entries = listing.len(), long = self.options.long_format, "rendering");
        if self.options.long_format {
            long::write_long(out, listing, self.config, self.provider, dir.is_dir())
        } else {
            compact::write_compact(out, listing, self.config)
        }
    }
}

/// Report a per-path error in place.
pub fn write_error<W: Write>(out: &mut W, err: &ListError) -> io::Result<()> {
    debug!(error = %err, "reporting error");
    writeln!(out, "Error: {}", err)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::listing::EntryLister;
    use crate::metadata::PlaceholderMetadataProvider;
    use crate::path::resolve;
    use crate::test_utils::TestDir;

    /// Provider with fixed ownership and a controllable symlink target.
    struct FixedProvider {
        target: Option<PathBuf>,
    }

    impl FileMetadataProvider for FixedProvider {
        fn owner_name(&self, _meta: &std::fs::Metadata) -> Option<String> {
            Some("alice".to_string())
        }
        fn group_name(&self, _meta: &std::fs::Metadata) -> Option<String> {
            Some("staff".to_string())
        }
        fn link_count(&self, _meta: &std::fs::Metadata) -> Option<u64> {
            Some(3)
        }
        fn block_count(&self, _meta: &std::fs::Metadata) -> Option<u64> {
            Some(8)
        }
        fn symlink_target(&self, _path: &Path) -> Option<PathBuf> {
            self.target.clone()
        }
    }

    fn render_with(
        dir: &TestDir,
        flags: &str,
        config: &OutputConfig,
        provider: &dyn FileMetadataProvider,
    ) -> String {
        let options = Options::from_short_flags(flags).unwrap();
        let resolved = resolve(".", dir.path()).unwrap();
        let listing = EntryLister::new(&options).list(&resolved).unwrap();
        let mut buf = termcolor::Buffer::no_color();
        Renderer::new(&options, config, provider)
            .render(&resolved, &listing, &mut buf)
            .unwrap();
        String::from_utf8_lossy(buf.as_slice()).to_string()
    }

    #[test]
    fn test_compact_single_line() {
        let dir = TestDir::new();
        dir.add_file("b.txt", "x");
        dir.add_dir("a");

        let out = render_with(&dir, "a", &OutputConfig::plain(), &PlaceholderMetadataProvider);
        assert_eq!(out, ". .. a b.txt\n");
    }

    #[test]
    fn test_compact_empty_listing_writes_nothing() {
        let dir = TestDir::new();
        let out = render_with(&dir, "", &OutputConfig::plain(), &PlaceholderMetadataProvider);
        assert_eq!(out, "");
    }

    #[test]
    fn test_long_total_logical_kib() {
        let dir = TestDir::new();
        dir.add_sized_file("empty", 0);
        dir.add_sized_file("small", 500);
        dir.add_sized_file("one_k", 1024);
        dir.add_sized_file("two_k", 2048);

        let out = render_with(&dir, "l", &OutputConfig::plain(), &PlaceholderMetadataProvider);
        assert_eq!(out.lines().next(), Some("total 4"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_long_total_allocated_blocks() {
        let dir = TestDir::new();
        dir.add_sized_file("a", 10);
        dir.add_sized_file("b", 10);

        let config = OutputConfig {
            use_color: false,
            total_policy: TotalPolicy::AllocatedBlocks,
        };
        let provider = FixedProvider { target: None };
        let out = render_with(&dir, "l", &config, &provider);
        // 8 blocks of 512 bytes per entry is 4 KiB each
        assert_eq!(out.lines().next(), Some("total 8"));
    }

    #[test]
    fn test_allocated_blocks_falls_back_without_provider_data() {
        let dir = TestDir::new();
        dir.add_sized_file("a", 3000);

        let config = OutputConfig {
            use_color: false,
            total_policy: TotalPolicy::AllocatedBlocks,
        };
        let out = render_with(&dir, "l", &config, &PlaceholderMetadataProvider);
        assert_eq!(out.lines().next(), Some("total 3"));
    }

    #[test]
    fn test_long_line_fields() {
        let dir = TestDir::new();
        dir.add_sized_file("report.txt", 42);

        let provider = FixedProvider { target: None };
        let out = render_with(&dir, "l", &OutputConfig::plain(), &provider);
        let line = out.lines().nth(1).unwrap();
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 7);
        assert!(fields[0].starts_with('-'));
        assert_eq!(fields[0].len(), 10);
        assert_eq!(fields[1], "3");
        assert_eq!(fields[2], "alice");
        assert_eq!(fields[3], "staff");
        assert_eq!(fields[4], "42");
        assert_eq!(fields[6], "report.txt");
    }

    #[test]
    fn test_long_placeholders_without_ownership() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "x");

        let out = render_with(&dir, "l", &OutputConfig::plain(), &PlaceholderMetadataProvider);
        let line = out.lines().nth(1).unwrap();
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields[1], "0");
        assert_eq!(fields[2], UNAVAILABLE);
        assert_eq!(fields[3], UNAVAILABLE);
    }

    #[cfg(unix)]
    #[test]
    fn test_long_symlink_shows_target() {
        let dir = TestDir::new();
        dir.add_file("target.txt", "x");
        dir.add_symlink("target.txt", "link");

        let out = render_with(&dir, "la", &OutputConfig::plain(), &PlaceholderMetadataProvider);
        let line = out.lines().find(|l| l.contains("link")).unwrap();
        assert!(line.ends_with("\tlink -> target.txt"), "got {line}");
        assert!(line.starts_with('l'));
    }

    #[cfg(unix)]
    #[test]
    fn test_long_symlink_unreadable_target_falls_back() {
        let dir = TestDir::new();
        dir.add_symlink("missing", "dangling");

        let provider = FixedProvider { target: None };
        let out = render_with(&dir, "l", &OutputConfig::plain(), &provider);
        let line = out.lines().nth(1).unwrap();
        assert!(line.ends_with("\tdangling"), "got {line}");
    }

    #[test]
    fn test_file_operand_has_no_total() {
        let dir = TestDir::new();
        dir.add_file("a.txt", "x");

        let options = Options::from_short_flags("l").unwrap();
        let config = OutputConfig::plain();
        let resolved = resolve("a.txt", dir.path()).unwrap();
        let listing = EntryLister::new(&options).single(&resolved).unwrap();
        let mut buf = termcolor::Buffer::no_color();
        Renderer::new(&options, &config, &PlaceholderMetadataProvider)
            .render(&resolved, &listing, &mut buf)
            .unwrap();
        let out = String::from_utf8_lossy(buf.as_slice()).to_string();
        assert!(!out.starts_with("total"));
        assert!(out.trim_end().ends_with("\ta.txt"));
    }

    #[test]
    fn test_write_error_prefix() {
        let mut out = Vec::new();
        write_error(&mut out, &ListError::DirectoryCycle { path: "x".to_string() }).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: not listing 'x': directory loop detected\n"
        );
    }
}
