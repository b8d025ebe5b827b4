//! In-memory query-param store backed by a concurrent map.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{QueryParamStore, WriteOptions};
use crate::error::StoreError;

/// Fallback store for hosts without a navigable location.
///
/// Read/write semantics are identical to
/// [`LocationStore`](super::LocationStore); values simply do not survive
/// the process and there is no history stack to navigate.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    params: DashMap<String, String>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            params: DashMap::new(),
        }
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no keys are present.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[async_trait]
impl QueryParamStore for InMemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.params.get(key).map(|entry| entry.value().clone())
    }

    async fn write(
        &self,
        key: &str,
        value: Option<&str>,
        _options: &WriteOptions,
    ) -> Result<(), StoreError> {
        match value {
            Some(value) => {
                self.params.insert(key.to_string(), value.to_string());
            }
            None => {
                self.params.remove(key);
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
