//! Error kinds reported while resolving, listing and walking paths

use std::io;

use thiserror::Error;

/// Errors produced by the listing core.
///
/// Argument errors are fatal for the whole invocation. Every other variant is
/// scoped to a single path or subdirectory and is reported in place.
#[derive(Debug, Error)]
pub enum ListError {
    /// An unknown short flag character.
    #[error("invalid option -- '{0}'")]
    InvalidOption(char),

    /// An unknown `--long` flag.
    #[error("option '{0}' is ambiguous; possibilities: '--all' '--reverse' '--recursive'")]
    InvalidLongOption(String),

    /// A path given on the command line could not be stat'ed.
    #[error("cannot access '{path}': {source}")]
    NotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Stat or enumeration failed while listing a directory.
    #[error("cannot open directory '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Descending would re-enter a directory already on the current chain.
    #[error("not listing '{path}': directory loop detected")]
    DirectoryCycle { path: String },
}
