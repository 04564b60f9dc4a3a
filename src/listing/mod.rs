//! Directory listing logic
//!
//! - `EntryLister`: one directory level, filtered and ordered
//! - `RecursiveWalker`: repeated listings, depth-first over subdirectories

mod entry;
mod lister;
pub mod order;
mod walker;

pub use entry::{DirectoryListing, Entry};
pub use lister::EntryLister;
pub use order::{compare_names, name_less};
pub use walker::RecursiveWalker;
