//! Location-backed query-param store.

use std::sync::{Arc, RwLock, Weak};

use async_trait::async_trait;
use url::form_urlencoded;

use super::{HistoryMode, QueryParamStore, WriteOptions};
use crate::error::StoreError;

/// A navigable location owned by the host.
///
/// Holds a history stack of query strings. `push` truncates the forward
/// entries and appends; `replace` mutates the current entry; [`back`] and
/// [`forward`] move the cursor the way host navigation buttons do.
/// Cheap to clone; clones share the same stack.
///
/// [`back`]: SharedLocation::back
/// [`forward`]: SharedLocation::forward
#[derive(Debug, Clone)]
pub struct SharedLocation {
    inner: Arc<RwLock<LocationState>>,
}

#[derive(Debug)]
struct LocationState {
    entries: Vec<String>,
    cursor: usize,
}

impl LocationState {
    fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    fn push(&mut self, query: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(query);
        self.cursor += 1;
    }

    fn replace(&mut self, query: String) {
        self.entries[self.cursor] = query;
    }
}

impl SharedLocation {
    /// A location with an empty query string.
    pub fn new() -> Self {
        Self::with_query("")
    }

    /// A location starting at the given query string (no leading `?`).
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LocationState {
                entries: vec![query.into()],
                cursor: 0,
            })),
        }
    }

    /// Current query string.
    pub fn query(&self) -> String {
        self.inner
            .read()
            .map(|state| state.current().to_string())
            .unwrap_or_default()
    }

    /// Navigate back one history entry. Returns `false` at the start.
    pub fn back(&self) -> bool {
        if let Ok(mut state) = self.inner.write()
            && state.cursor > 0
        {
            state.cursor -= 1;
            return true;
        }
        false
    }

    /// Navigate forward one history entry. Returns `false` at the end.
    pub fn forward(&self) -> bool {
        if let Ok(mut state) = self.inner.write()
            && state.cursor + 1 < state.entries.len()
        {
            state.cursor += 1;
            return true;
        }
        false
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.inner.read().map(|state| state.entries.len()).unwrap_or(0)
    }

    fn downgrade(&self) -> Weak<RwLock<LocationState>> {
        Arc::downgrade(&self.inner)
    }
}

impl Default for SharedLocation {
    fn default() -> Self {
        Self::new()
    }
}

/// Reactive store bound to a [`SharedLocation`].
///
/// Holds only a weak reference: the location is a shared sink the host
/// owns, not something the store keeps alive. Reads on a disposed location
/// return `None`; writes fail with [`StoreError::LocationDetached`].
pub struct LocationStore {
    location: Weak<RwLock<LocationState>>,
}

impl LocationStore {
    pub fn new(location: &SharedLocation) -> Self {
        Self {
            location: location.downgrade(),
        }
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

fn serialize_query(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[async_trait]
impl QueryParamStore for LocationStore {
    fn read(&self, key: &str) -> Option<String> {
        let location = self.location.upgrade()?;
        let query = location.read().map(|state| state.current().to_string()).ok()?;
        parse_query(&query)
            .into_iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    async fn write(
        &self,
        key: &str,
        value: Option<&str>,
        options: &WriteOptions,
    ) -> Result<(), StoreError> {
        let location = self
            .location
            .upgrade()
            .ok_or(StoreError::LocationDetached)?;
        let mut state = location
            .write()
            .map_err(|_| StoreError::LocationDetached)?;

        let mut pairs = parse_query(state.current());
        match value {
            Some(value) => {
                // Update in place so key order in the query string is stable
                // across rewrites of the same key.
                if let Some(pair) = pairs.iter_mut().find(|(candidate, _)| candidate == key) {
                    pair.1 = value.to_string();
                } else {
                    pairs.push((key.to_string(), value.to_string()));
                }
            }
            None => pairs.retain(|(candidate, _)| candidate != key),
        }

        let query = serialize_query(&pairs);
        match options.history {
            HistoryMode::Push => state.push(query),
            HistoryMode::Replace => state.replace(query),
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        match self.location.upgrade() {
            Some(location) => location
                .read()
                .map(|state| parse_query(state.current()))
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}
