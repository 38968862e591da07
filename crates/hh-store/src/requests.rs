//! The admin request list: one JSON array stored under a single key.

use chrono::Utc;
use hh_core::{AdminRequest, AdminRequestStatus, NewAdminRequest};
use uuid::Uuid;

use crate::kv::KeyValueStore;
use crate::seed::seed_requests;
use crate::{StoreConfig, StoreError};

/// Read and decode the stored request list.
///
/// # Errors
///
/// Returns [`StoreError::Missing`] when nothing is stored under `key`,
/// [`StoreError::Corrupt`] when the stored value is not a request list, or a
/// backend error from the store.
pub fn load_requests<S>(store: &S, key: &str) -> Result<Vec<AdminRequest>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let raw = store
        .get(key)?
        .ok_or_else(|| StoreError::Missing(key.to_string()))?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}

/// Load the request list, replacing it with the seed list when it is absent
/// or unreadable. The seed is persisted before it is returned.
///
/// # Errors
///
/// Returns any store error other than a missing or corrupt value, or an
/// error writing the seed.
pub fn load_or_seed<S>(store: &S, key: &str) -> Result<Vec<AdminRequest>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    match load_requests(store, key) {
        Ok(requests) => Ok(requests),
        Err(StoreError::Missing(_)) => {
            tracing::debug!(key, "no stored admin requests; writing seed list");
            write_seed(store, key)
        }
        Err(StoreError::Corrupt { source, .. }) => {
            tracing::warn!(key, error = %source, "stored admin requests are corrupt; reseeding");
            write_seed(store, key)
        }
        Err(e) => Err(e),
    }
}

fn write_seed<S>(store: &S, key: &str) -> Result<Vec<AdminRequest>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let seed = seed_requests();
    persist(store, key, &seed)?;
    Ok(seed)
}

fn persist<S>(store: &S, key: &str, requests: &[AdminRequest]) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
{
    // serde_json writes NaN and infinities as null, which would not load back.
    if let Some(bad) = requests
        .iter()
        .find(|r| !(r.location_lat.is_finite() && r.location_lng.is_finite()))
    {
        return Err(StoreError::NonFiniteCoordinate { id: bad.id.clone() });
    }
    let encoded = serde_json::to_string(requests).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &encoded)
}

/// Ordered admin requests with an in-memory copy of the stored list.
///
/// Every mutation writes the whole list back in one `set`. The cached list is
/// only replaced after that write succeeds, so a failed write leaves both the
/// cache and storage as they were.
#[derive(Debug)]
pub struct AdminRequestRepository<S> {
    store: S,
    key: String,
    requests: Vec<AdminRequest>,
}

impl<S: KeyValueStore> AdminRequestRepository<S> {
    /// Open the repository, seeding storage if needed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`load_or_seed`].
    pub fn open(store: S, config: &StoreConfig) -> Result<Self, StoreError> {
        let key = config.requests_key.clone();
        let requests = load_or_seed(&store, &key)?;
        Ok(Self {
            store,
            key,
            requests,
        })
    }

    /// Re-read the list from storage, applying the same seed policy as `open`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`load_or_seed`].
    pub fn reload(&mut self) -> Result<&[AdminRequest], StoreError> {
        self.requests = load_or_seed(&self.store, &self.key)?;
        Ok(&self.requests)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn requests(&self) -> &[AdminRequest] {
        &self.requests
    }

    #[must_use]
    pub fn pending(&self) -> Vec<&AdminRequest> {
        self.requests.iter().filter(|r| r.is_pending()).collect()
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&AdminRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn for_user(&self, user_id: &str) -> Vec<&AdminRequest> {
        self.requests.iter().filter(|r| r.user_id == user_id).collect()
    }

    #[must_use]
    pub fn has_pending_for(&self, user_id: &str) -> bool {
        self.requests
            .iter()
            .any(|r| r.user_id == user_id && r.is_pending())
    }

    /// Append a new pending request and persist the list.
    ///
    /// Duplicates are not checked here; a user may hold several requests.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NonFiniteCoordinate`] for a NaN or infinite
    /// coordinate, or a store error if the list cannot be written.
    pub fn submit(&mut self, new: NewAdminRequest) -> Result<AdminRequest, StoreError> {
        let request = new.into_request(Uuid::new_v4().to_string(), Utc::now());

        let mut updated = self.requests.clone();
        updated.push(request.clone());
        persist(&self.store, &self.key, &updated)?;
        self.requests = updated;

        tracing::info!(
            id = %request.id,
            user_id = %request.user_id,
            shop_name = %request.shop_name,
            "admin request submitted"
        );
        Ok(request)
    }

    /// Set the status of the request with `id`.
    ///
    /// Returns `Ok(None)` without writing anything when no request has that id.
    /// Only the status field changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTransition`] unless the request is pending
    /// and `status` is a decision, or a store error if the write fails.
    pub fn update_status(
        &mut self,
        id: &str,
        status: AdminRequestStatus,
    ) -> Result<Option<AdminRequest>, StoreError> {
        let Some(index) = self.requests.iter().position(|r| r.id == id) else {
            tracing::debug!(id, "status update for unknown admin request ignored");
            return Ok(None);
        };

        let current = self.requests[index].status;
        if !current.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                id: id.to_string(),
                from: current,
                to: status,
            });
        }

        let mut updated = self.requests.clone();
        updated[index].status = status;
        persist(&self.store, &self.key, &updated)?;
        self.requests = updated;

        let request = self.requests[index].clone();
        tracing::info!(id, from = %current, to = %status, "admin request status updated");
        Ok(Some(request))
    }
}
