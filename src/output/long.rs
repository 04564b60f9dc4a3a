//! Long format: a `total` line, then one tab-separated line per entry

use std::io::{self, Write};

use termcolor::WriteColor;

use crate::listing::{DirectoryListing, Entry};
use crate::metadata::{FileMetadataProvider, permission_string};

use super::config::OutputConfig;
use super::utils::{format_mod_time, total_blocks, write_name};

/// Shown for owner and group when the host has no ownership data.
pub const UNAVAILABLE: &str = "N/A";

/// Write the long format. `with_total` is false for file operands.
pub fn write_long<W: WriteColor>(
    out: &mut W,
    listing: &DirectoryListing,
    config: &OutputConfig,
    provider: &dyn FileMetadataProvider,
    with_total: bool,
) -> io::Result<()> {
    if with_total {
        writeln!(
            out,
            "total {}",
            total_blocks(listing, config.total_policy, provider)
        )?;
    }
    for entry in listing {
        write_long_line(out, entry, config, provider)?;
    }
    Ok(())
}

fn write_long_line<W: WriteColor>(
    out: &mut W,
    entry: &Entry,
    config: &OutputConfig,
    provider: &dyn FileMetadataProvider,
) -> io::Result<()> {
    let meta = &entry.metadata;
    let owner = provider
        .owner_name(meta)
        .unwrap_or_else(|| UNAVAILABLE.to_string());
    let group = provider
        .group_name(meta)
        .unwrap_or_else(|| UNAVAILABLE.to_string());
    let links = provider.link_count(meta).unwrap_or(0);

    write!(
        out,
        "{}\t{}\t{}\t{}\t{}\t{}\t",
        permission_string(meta),
        links,
        owner,
        group,
        entry.size,
        format_mod_time(entry.modified)
    )?;
    write_name(out, &entry.name, entry.is_dir, config.use_color)?;

    if entry.is_symlink() {
        if let Some(target) = provider.symlink_target(&entry.path) {
            write!(out, " -> {}", target.display())?;
        }
    }
    writeln!(out)
}
