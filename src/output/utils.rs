//! Shared utility functions for output formatting

use std::io::{self, Write};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::listing::{DirectoryListing, Entry};
use crate::metadata::FileMetadataProvider;

use super::config::TotalPolicy;

const KIB: u64 = 1024;

/// Timestamp layout of the long format, e.g. `Mar  5 14:07`.
pub const TIME_FORMAT: &str = "%b %e %H:%M";

/// Logical 1 KiB units for one entry: 0 when empty, otherwise rounded up.
pub fn logical_blocks(size: u64) -> u64 {
    size.div_ceil(KIB)
}

/// Block units contributed by one entry under `policy`.
pub fn entry_blocks(entry: &Entry, policy: TotalPolicy, provider: &dyn FileMetadataProvider) -> u64 {
    match policy {
        TotalPolicy::LogicalKib => logical_blocks(entry.size),
        TotalPolicy::AllocatedBlocks => provider
            .block_count(&entry.metadata)
            .map(|blocks| blocks.div_ceil(2))
            .unwrap_or_else(|| logical_blocks(entry.size)),
    }
}

/// Value printed on the `total` line for `listing`.
pub fn total_blocks(
    listing: &DirectoryListing,
    policy: TotalPolicy,
    provider: &dyn FileMetadataProvider,
) -> u64 {
    listing
        .iter()
        .map(|entry| entry_blocks(entry, policy, provider))
        .sum()
}

/// Format a modification time in local time.
pub fn format_mod_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format(TIME_FORMAT).to_string()
}

/// Write an entry name, bold blue for directories when color is on.
pub fn write_name<W: WriteColor>(out: &mut W, name: &str, is_dir: bool, use_color: bool) -> io::Result<()> {
    if is_dir && use_color {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(out, "{}", name)?;
        out.reset()
    } else {
        write!(out, "{}", name)
    }
}
