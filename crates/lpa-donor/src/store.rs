//! # Guarded Persistence
//!
//! [`DonorStore::put`] and [`DonorStore::put_as_donor`] are the only ways
//! an application is written. Both skip the write entirely when the main
//! change hash is unchanged, invalidate a stale check-your-lpa confirmation,
//! and notify downstream collaborators once the application has an external
//! reference. The donor variant also refuses changes to checked content
//! after signing.
//!
//! ## Collaborators
//!
//! Persistence, events and search are traits so callers can supply their
//! own transports. Each returns `Ok(())` on success or an error description
//! on failure; [`DonorStore`] decides which failures abort the write.
//! [`InMemoryDataClient`] and the `Recording*` doubles cover tests and the
//! file-backed CLI.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lpa_core::LpaId;
use parking_lot::{Mutex, RwLock};

use crate::error::StoreError;
use crate::provided::Provided;

/// Persists applications.
pub trait DataClient: Send + Sync {
    fn put(&self, provided: &Provided) -> Result<(), String>;

    fn get(&self, lpa_id: &LpaId) -> Result<Option<Provided>, String>;
}

/// Publishes application lifecycle events.
pub trait EventClient: Send + Sync {
    fn send_application_updated(&self, provided: &Provided) -> Result<(), String>;
}

/// Keeps the application search index current.
pub trait SearchClient: Send + Sync {
    fn index(&self, provided: &Provided) -> Result<(), String>;
}

/// In-memory [`DataClient`].
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataClient {
    data: Arc<RwLock<HashMap<String, Provided>>>,
}

impl InMemoryDataClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Every stored application, in no particular order.
    pub fn list(&self) -> Vec<Provided> {
        self.data.read().values().cloned().collect()
    }
}

impl DataClient for InMemoryDataClient {
    fn put(&self, provided: &Provided) -> Result<(), String> {
        self.data
            .write()
            .insert(provided.lpa_id.as_str().to_string(), provided.clone());
        Ok(())
    }

    fn get(&self, lpa_id: &LpaId) -> Result<Option<Provided>, String> {
        Ok(self.data.read().get(lpa_id.as_str()).cloned())
    }
}

/// An [`EventClient`] that records the applications it was sent.
#[derive(Debug, Default)]
pub struct RecordingEventClient {
    /// Lpa uids of every application-updated event, in order.
    pub sent: Mutex<Vec<String>>,
    /// Fail every call with this message.
    pub fail_with: Option<String>,
}

impl EventClient for RecordingEventClient {
    fn send_application_updated(&self, provided: &Provided) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        self.sent
            .lock()
            .push(provided.lpa_uid.clone().unwrap_or_default());
        Ok(())
    }
}

/// A [`SearchClient`] that records the applications it indexed.
#[derive(Debug, Default)]
pub struct RecordingSearchClient {
    /// Lpa ids of every indexed application, in order.
    pub indexed: Mutex<Vec<String>>,
    /// Fail every call with this message.
    pub fail_with: Option<String>,
}

impl SearchClient for RecordingSearchClient {
    fn index(&self, provided: &Provided) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        self.indexed.lock().push(provided.lpa_id.as_str().to_string());
        Ok(())
    }
}

/// Writes applications through the change-hash guard.
#[derive(Clone)]
pub struct DonorStore {
    data: Arc<dyn DataClient>,
    events: Arc<dyn EventClient>,
    search: Arc<dyn SearchClient>,
}

impl DonorStore {
    pub fn new(
        data: Arc<dyn DataClient>,
        events: Arc<dyn EventClient>,
        search: Arc<dyn SearchClient>,
    ) -> Self {
        Self { data, events, search }
    }

    /// Create and write a new application.
    pub fn create(&self, lpa_id: LpaId, now: DateTime<Utc>) -> Result<Provided, StoreError> {
        let mut provided = Provided::new(lpa_id, now);
        provided.reconcile();
        self.put(&mut provided, now)?;
        Ok(provided)
    }

    /// Load an application.
    pub fn get(&self, lpa_id: &LpaId) -> Result<Option<Provided>, StoreError> {
        self.data.get(lpa_id).map_err(|message| StoreError::Data {
            lpa_id: lpa_id.to_string(),
            message,
        })
    }

    /// Write `provided` if its main hash has changed.
    ///
    /// Returns whether a write happened. On success the stored record and
    /// `provided` carry the same `updated_at` and hash. On failure
    /// `provided` keeps its previous hash and `updated_at`, so putting it
    /// again retries the write.
    pub fn put(&self, provided: &mut Provided, now: DateTime<Utc>) -> Result<bool, StoreError> {
        if !provided.hash_changed() {
            tracing::debug!(lpa_id = %provided.lpa_id, "unchanged, skipping write");
            return Ok(false);
        }

        self.write(provided, now)?;
        Ok(true)
    }

    /// [`put`](Self::put) on behalf of the donor.
    ///
    /// Once the application is signed the donor may no longer change
    /// anything covered by the checked hash; such a write is refused with
    /// [`StoreError::SignedLpaChanged`].
    pub fn put_as_donor(
        &self,
        provided: &mut Provided,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        if !provided.hash_changed() {
            tracing::debug!(lpa_id = %provided.lpa_id, "unchanged, skipping write");
            return Ok(false);
        }

        if !provided.can_change() && provided.checked_hash_changed() {
            tracing::warn!(lpa_id = %provided.lpa_id, "donor tried to change a signed application");
            return Err(StoreError::SignedLpaChanged {
                lpa_id: provided.lpa_id.to_string(),
            });
        }

        self.write(provided, now)?;
        Ok(true)
    }

    fn write(&self, provided: &mut Provided, now: DateTime<Utc>) -> Result<(), StoreError> {
        if provided.checked_hash_changed() && provided.tasks.check_your_lpa.is_completed() {
            tracing::debug!(lpa_id = %provided.lpa_id, "checked content changed, check-your-lpa reopened");
            provided.tasks.check_your_lpa = lpa_task::State::InProgress;
        }

        if let Some(lpa_uid) = provided.lpa_uid.clone() {
            if !provided.has_sent_application_updated_event {
                self.events
                    .send_application_updated(provided)
                    .map_err(|message| StoreError::Event {
                        lpa_uid: lpa_uid.clone(),
                        message,
                    })?;
                provided.has_sent_application_updated_event = true;
            }

            if let Err(message) = self.search.index(provided) {
                tracing::warn!(lpa_id = %provided.lpa_id, %lpa_uid, error = %message, "search index update failed");
            }
        }

        // `provided` keeps its old hash until the record is stored.
        let mut record = provided.clone();
        record.updated_at = Some(now);
        record.update_hash()?;
        self.data.put(&record).map_err(|message| StoreError::Data {
            lpa_id: record.lpa_id.to_string(),
            message,
        })?;

        tracing::info!(lpa_id = %record.lpa_id, hash = %lpa_core::hash_hex(record.hash), "application written");
        *provided = record;
        Ok(())
    }
}

impl std::fmt::Debug for DonorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonorStore").finish_non_exhaustive()
    }
}
