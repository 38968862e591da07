use std::sync::Arc;

use crate::StoreError;

/// A flat string-to-string store.
///
/// Implementations must make each `set` atomic: a reader sees either the
/// previous value or the new one, never a partial write. There is no
/// cross-process coordination; concurrent writers to the same key race and
/// the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for malformed keys, or a backend error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for malformed keys, or a backend error.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] for malformed keys, or a backend error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the keys cannot be listed.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

/// Keys are non-empty, use only `[A-Za-z0-9_.-]`, and do not start with a dot.
///
/// # Errors
///
/// Returns [`StoreError::InvalidKey`] if the key breaks any of those rules.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if hh_core::config::is_valid_storage_key(key) {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
