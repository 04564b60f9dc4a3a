//! Compact format: names on one line separated by single spaces

use std::io::{self, Write};

use termcolor::WriteColor;

use crate::listing::DirectoryListing;

use super::config::OutputConfig;
use super::utils::write_name;

/// Write all names on a single line. An empty listing writes nothing.
pub fn write_compact<W: WriteColor>(
    out: &mut W,
    listing: &DirectoryListing,
    config: &OutputConfig,
) -> io::Result<()> {
    if listing.is_empty() {
        return Ok(());
    }

    for (index, entry) in listing.iter().enumerate() {
        if index > 0 {
            write!(out, " ")?;
        }
        write_name(out, &entry.name, entry.is_dir, config.use_color)?;
    }
    writeln!(out)
}
