//! Shared test helpers.
#![allow(dead_code)]

use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use tablesync::error::StoreError;
use tablesync::store::{InMemoryStore, QueryParamStore, WriteOptions};

static LOGGER: Once = Once::new();

/// Route `log` output through simplelog once per test binary.
pub fn init_logging() {
    LOGGER.call_once(|| {
        let _ = simplelog::SimpleLogger::init(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
        );
    });
}

/// Store wrapper that counts write calls, for asserting commit cadence.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    writes: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `write` calls observed (one per key, not per batch).
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryParamStore for CountingStore {
    fn read(&self, key: &str) -> Option<String> {
        self.inner.read(key)
    }

    async fn write(
        &self,
        key: &str,
        value: Option<&str>,
        options: &WriteOptions,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(key, value, options).await
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        self.inner.snapshot()
    }
}
