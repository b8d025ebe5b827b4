//! Query-param store adapter.
//!
//! Two interchangeable implementations sit behind [`QueryParamStore`]: a
//! reactive store bound to a navigable [`SharedLocation`] (so back/forward
//! navigation is reflected with no extra plumbing), and an in-memory
//! fallback with identical read/write semantics for hosts without one.
//! [`query_param_store`] picks between them; callers never branch.

mod location;
mod memory;

pub use location::LocationStore;
pub use location::SharedLocation;
pub use memory::InMemoryStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;

/// History behavior for a query-param write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Replace the current history entry. The default: typing in a filter
    /// must not spam the back stack.
    #[default]
    Replace,
    /// Push a new history entry, truncating any forward entries.
    Push,
}

/// Pass-through options for a store write.
///
/// Opaque to the codec and controller layers; the host interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub history: HistoryMode,
    /// Whether the host should reset viewport scroll after the write.
    pub scroll: bool,
    /// Avoid triggering a full data refetch downstream.
    pub shallow: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            history: HistoryMode::Replace,
            scroll: false,
            shallow: true,
        }
    }
}

/// Backend trait for query-param storage.
///
/// Writing `None` removes the key. Reads are total; only writes can fail.
#[async_trait]
pub trait QueryParamStore: Send + Sync {
    /// Current value for a key, if present.
    fn read(&self, key: &str) -> Option<String>;

    /// Write a value, or remove the key when `value` is `None`.
    async fn write(
        &self,
        key: &str,
        value: Option<&str>,
        options: &WriteOptions,
    ) -> Result<(), StoreError>;

    /// All current key/value pairs, for rehydration.
    fn snapshot(&self) -> Vec<(String, String)>;
}

/// Selects the store implementation for the current host.
///
/// Returns a [`LocationStore`] when a navigable location is available and
/// falls back to an [`InMemoryStore`] otherwise. The fallback is automatic
/// and non-fatal so construction never crashes the caller.
pub fn query_param_store(location: Option<&SharedLocation>) -> Arc<dyn QueryParamStore> {
    match location {
        Some(location) => Arc::new(LocationStore::new(location)),
        None => {
            log::debug!("no navigable location available, using in-memory query params");
            Arc::new(InMemoryStore::new())
        }
    }
}
