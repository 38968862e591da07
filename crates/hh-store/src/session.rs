use crate::kv::KeyValueStore;
use crate::{StoreConfig, StoreError};

/// Per-session flags. Backed by a [`crate::MemoryStore`] they last for the
/// process lifetime only.
#[derive(Debug)]
pub struct SessionFlags<S> {
    store: S,
    opening_key: String,
}

impl<S: KeyValueStore> SessionFlags<S> {
    pub fn new(store: S, config: &StoreConfig) -> Self {
        Self {
            store,
            opening_key: config.opening_key.clone(),
        }
    }

    /// Whether the opening animation has already been shown.
    ///
    /// # Errors
    ///
    /// Returns a store error if the flag cannot be read.
    pub fn opening_shown(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(&self.opening_key)?.is_some())
    }

    /// # Errors
    ///
    /// Returns a store error if the flag cannot be written.
    pub fn mark_opening_shown(&self) -> Result<(), StoreError> {
        self.store.set(&self.opening_key, "true")
    }
}
