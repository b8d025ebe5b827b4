//! Debounced commit scheduling.
//!
//! Filter edits arrive as a stream of intended values. A [`Debouncer`]
//! holds the latest one until the input goes quiet, then hands it to the
//! [`CommitPipeline`], which applies batches to the store in order and
//! spaces consecutive writes at least one throttle window apart.

mod debounce;
mod pipeline;

pub use debounce::Debouncer;
pub use pipeline::CommitBatch;
pub use pipeline::CommitHandle;
pub use pipeline::CommitPipeline;

use std::time::Duration;

/// Timing windows for the commit scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Trailing debounce window for continuous input (filter typing).
    pub debounce: Duration,
    /// Minimum spacing between consecutive store commits.
    pub throttle: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            throttle: Duration::from_millis(50),
        }
    }
}
