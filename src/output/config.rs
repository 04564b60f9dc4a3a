//! Output configuration types

/// How the `total` line of the long format is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalPolicy {
    /// One unit per started KiB of logical size; empty entries count 0
    #[default]
    LogicalKib,
    /// Allocated 512-byte blocks halved, when the provider knows them
    AllocatedBlocks,
}

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    pub total_policy: TotalPolicy,
}

impl OutputConfig {
    /// Plain output with the default total policy.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            ..Self::default()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            total_policy: TotalPolicy::default(),
        }
    }
}
