//! Entry ordering: punctuation-skipping name order, mtime order, reversal
//!
//! Name and mtime sorts leave the synthetic `.`/`..` pair at the front.
//! Reversal flips the whole slice, synthetic entries included.

use std::cmp::Ordering;

use super::entry::Entry;

/// The part of `name` that takes part in name ordering.
///
/// A leading run of non-letters is skipped; a name with no ASCII letter
/// compares as empty.
pub fn sort_key(name: &str) -> &str {
    match name.find(|c: char| c.is_ascii_alphabetic()) {
        Some(start) => &name[start..],
        None => "",
    }
}

/// Byte-wise comparison of the names after skipping leading punctuation.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a).as_bytes().cmp(sort_key(b).as_bytes())
}

/// Strict weak order over display names.
pub fn name_less(a: &str, b: &str) -> bool {
    compare_names(a, b) == Ordering::Less
}

/// Number of synthetic entries at the front of `entries`.
fn synthetic_prefix(entries: &[Entry]) -> usize {
    entries.iter().take_while(|e| e.is_synthetic()).count()
}

/// Sort by punctuation-skipping name, keeping `.`/`..` in place.
pub fn sort_by_name(entries: &mut [Entry]) {
    let start = synthetic_prefix(entries);
    entries[start..].sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Sort most recently modified first, keeping `.`/`..` in place.
pub fn sort_by_mod_time(entries: &mut [Entry]) {
    let start = synthetic_prefix(entries);
    entries[start..].sort_by(|a, b| b.modified.cmp(&a.modified));
}

pub fn reverse(entries: &mut [Entry]) {
    entries.reverse();
}
