//! Local key-value persistence for Hunger's Harmony.
//!
//! A [`KeyValueStore`] holds raw string values under flat keys. The admin
//! request list is one JSON document under a single key; the repository reads
//! and rewrites the whole list on every mutation, so a single `set` is the
//! unit of atomicity.

pub mod file;
pub mod kv;
pub mod memory;
pub mod requests;
pub mod seed;
pub mod session;

pub use file::FileStore;
pub use kv::{validate_key, KeyValueStore};
pub use memory::MemoryStore;
pub use requests::{load_or_seed, load_requests, AdminRequestRepository};
pub use seed::seed_requests;
pub use session::SessionFlags;

use hh_core::config::{DEFAULT_OPENING_KEY, DEFAULT_REQUESTS_KEY};
use hh_core::{AdminRequestStatus, AppConfig};
use thiserror::Error;

/// Storage keys for one application instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub requests_key: String,
    pub opening_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            requests_key: DEFAULT_REQUESTS_KEY.to_string(),
            opening_key: DEFAULT_OPENING_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            requests_key: config.requests_key.clone(),
            opening_key: config.opening_key.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("no value stored under '{0}'")]
    Missing(String),
    #[error("stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("request {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: AdminRequestStatus,
        to: AdminRequestStatus,
    },
}
