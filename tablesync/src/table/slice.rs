//! Controlled state cells with the functional-update contract.

use std::sync::{Arc, RwLock};

/// A new value, or a pure updater applied to the previous value.
///
/// Updaters keep composition safe when several UI elements schedule
/// changes against the same slice in one tick: each sees the value the
/// previous update produced.
pub enum Update<T> {
    Set(T),
    With(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    /// Replace the value outright.
    pub fn set(value: T) -> Self {
        Update::Set(value)
    }

    /// Derive the next value from the previous one.
    pub fn with(updater: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Update::With(Box::new(updater))
    }

    /// Resolve against the previous value.
    pub fn apply(self, previous: &T) -> T {
        match self {
            Update::Set(value) => value,
            Update::With(updater) => updater(previous),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Update::Set(value)
    }
}

/// Shared state cell for one controlled slice.
///
/// Cheap to clone; clones share the value. Reads recover from lock
/// poisoning instead of propagating it.
#[derive(Debug)]
pub(crate) struct Slice<T> {
    inner: Arc<RwLock<T>>,
}

impl<T: Clone> Slice<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply an update and return the new value.
    pub fn apply(&self, update: Update<T>) -> T {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = update.apply(&guard);
        *guard = next.clone();
        next
    }
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_updater() {
        let slice = Slice::new(1);
        assert_eq!(slice.apply(Update::set(5)), 5);
        assert_eq!(slice.apply(Update::with(|previous| previous + 1)), 6);
        assert_eq!(slice.get(), 6);
    }

    #[test]
    fn test_clones_share_value() {
        let slice = Slice::new(String::from("a"));
        let other = slice.clone();
        slice.apply(Update::set(String::from("b")));
        assert_eq!(other.get(), "b");
    }
}
