//! Listing options

use crate::error::ListError;

/// Short flag characters understood by the listing core.
pub const SHORT_FLAGS: &[char] = &['a', 'l', 'r', 'R', 't'];

/// Configuration for one invocation.
///
/// Built once from the command line and never mutated afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Include dotfiles and the synthetic `.`/`..` entries
    pub all: bool,
    pub long_format: bool,
    pub reverse: bool,
    pub recursive: bool,
    /// Most recently modified first
    pub sort_by_mod_time: bool,
}

impl Options {
    /// Build options from a combined short flag cluster such as `alR`.
    ///
    /// Returns the first character that is not a known flag as an error.
    /// The binary parses argv with clap; this is for tests and benches.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn from_short_flags(flags: &str) -> Result<Self, ListError> {
        let mut options = Self::default();
        for c in flags.chars() {
            match c {
                'a' => options.all = true,
                'l' => options.long_format = true,
                'r' => options.reverse = true,
                'R' => options.recursive = true,
                't' => options.sort_by_mod_time = true,
                other => return Err(ListError::InvalidOption(other)),
            }
        }
        Ok(options)
    }

    /// Translate a command-line token the parser rejected into an argument error.
    ///
    /// `--name` tokens become [`ListError::InvalidLongOption`]; short clusters
    /// report their first unknown character.
    pub fn invalid_argument(token: &str) -> ListError {
        if token.starts_with("--") {
            let flag = token.split('=').next().unwrap_or(token);
            return ListError::InvalidLongOption(flag.to_string());
        }

        let cluster = token.strip_prefix('-').unwrap_or(token);
        let offending = cluster
            .chars()
            .find(|c| !SHORT_FLAGS.contains(c))
            .or_else(|| cluster.chars().next())
            .unwrap_or('-');
        ListError::InvalidOption(offending)
    }
}
