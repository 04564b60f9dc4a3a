//! lsr - directory listing with punctuation-aware ordering, long format and recursion

pub mod command;
pub mod error;
pub mod listing;
pub mod metadata;
pub mod options;
pub mod output;
pub mod path;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use command::ListCommand;
pub use error::ListError;
pub use listing::{DirectoryListing, Entry, EntryLister, RecursiveWalker, name_less};
pub use metadata::{FileMetadataProvider, PlaceholderMetadataProvider, default_provider};
pub use options::Options;
pub use output::{OutputConfig, Renderer, TotalPolicy};
pub use path::{PathKind, ResolvedPath, resolve};
