//! Store accessor.
//!
//! Reads and writes the whole [`StoreRecord`] under [`keys::STORE`]. Reads
//! never fail: an absent record is seeded with the default catalog and a
//! malformed one falls back to the default without touching storage.

use tracing::{error, info, instrument, warn};

use projecta_core::KeyValueStore;

use super::{Loaded, RepositoryError, keys, read_json, write_json};
use crate::models::StoreRecord;

/// Repository for the store record.
pub struct StoreRepository<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// Return the current store, seeding it on first use.
    ///
    /// A missing record is replaced by [`StoreRecord::seed`] and persisted.
    /// An unreadable or malformed record is logged and the default is
    /// returned instead; the stored value is left as it was.
    #[instrument(skip(self))]
    pub fn get_data(&self) -> StoreRecord {
        match read_json::<StoreRecord>(self.storage, keys::STORE) {
            Ok(Loaded::Found(record)) => record,
            Ok(Loaded::Missing) => {
                let seed = StoreRecord::seed();
                match self.save_data(&seed) {
                    Ok(()) => info!("Seeded store with default catalog"),
                    Err(e) => warn!(error = %e, "Failed to persist default store"),
                }
                seed
            }
            Err(e) => {
                error!(error = %e, "Failed to load store, using defaults");
                StoreRecord::seed()
            }
        }
    }

    /// Persist the full store record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected (for
    /// example when the quota is exceeded). The write is not retried.
    #[instrument(skip(self, store), fields(products = store.products.len()))]
    pub fn save_data(&self, store: &StoreRecord) -> Result<(), RepositoryError> {
        write_json(self.storage, keys::STORE, store).inspect_err(|e| {
            error!(error = %e, "Failed to save store");
        })
    }

    /// Remove the store record so the next read seeds defaults again.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the key cannot be removed.
    pub fn reset(&self) -> Result<(), RepositoryError> {
        self.storage.remove_item(keys::STORE)?;
        info!("Store reset");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use projecta_core::Price;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_first_read_seeds_and_persists() {
        let storage = MemoryStorage::new();
        let repo = StoreRepository::new(&storage);

        let data = repo.get_data();
        assert_eq!(data, StoreRecord::seed());
        assert!(storage.get_item(keys::STORE).unwrap().is_some());
    }

    #[test]
    fn test_malformed_falls_back_without_overwriting() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::STORE, "{not json").unwrap();
        let repo = StoreRepository::new(&storage);

        assert_eq!(repo.get_data(), StoreRecord::seed());
        assert_eq!(
            storage.get_item(keys::STORE).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_save_then_get_is_idempotent() {
        let storage = MemoryStorage::new();
        let repo = StoreRepository::new(&storage);

        let mut data = repo.get_data();
        data.content.mission = "Changed".to_string();
        repo.save_data(&data).unwrap();
        let first = storage.get_item(keys::STORE).unwrap();

        repo.save_data(&repo.get_data()).unwrap();
        assert_eq!(repo.get_data(), data);
        assert_eq!(storage.get_item(keys::STORE).unwrap(), first);
    }

    #[test]
    fn test_many_digit_price_round_trips() {
        let storage = MemoryStorage::new();
        let repo = StoreRepository::new(&storage);

        let mut data = repo.get_data();
        data.products[0].price = Price::parse("1234567.891234567891").unwrap();
        repo.save_data(&data).unwrap();

        assert_eq!(repo.get_data(), data);
        assert_eq!(repo.get_data().products[0].price, Price::from_cents(123_456_789));
    }

    #[test]
    fn test_save_surfaces_quota_error() {
        let storage = MemoryStorage::with_quota(16);
        let repo = StoreRepository::new(&storage);

        let err = repo.save_data(&StoreRecord::seed()).unwrap_err();
        assert!(matches!(err, RepositoryError::Storage(_)));
    }

    #[test]
    fn test_seed_survives_failed_initial_write() {
        let storage = MemoryStorage::with_quota(16);
        let repo = StoreRepository::new(&storage);
        assert_eq!(repo.get_data(), StoreRecord::seed());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_reset() {
        let storage = MemoryStorage::new();
        let repo = StoreRepository::new(&storage);
        repo.get_data();
        repo.reset().unwrap();
        assert!(storage.get_item(keys::STORE).unwrap().is_none());
    }
}
