//! Error types.

use thiserror::Error;

/// Errors surfaced by query-param store writes.
///
/// Writes are the only fallible surface in this crate. Reads and every
/// codec path are total: malformed input decodes to a safe default or is
/// dropped token-by-token, never returned as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The host location backing the store has been disposed.
    #[error("navigable location detached")]
    LocationDetached,
}
