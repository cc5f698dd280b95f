//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::RwLock;

use projecta_core::{KeyValueStore, StorageError};

use super::check_quota;

/// A `HashMap` behind a lock.
///
/// Used for session-scoped state (cleared when the process ends) and as the
/// test double for every repository.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty store without a quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: RwLock::default(),
            quota: Some(quota),
        }
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().map_or(0, |items| items.len())
    }

    /// Returns `true` if no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the lock is poisoned.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.items.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("memory storage lock poisoned".to_string())
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(poisoned)?;

        let others: usize = items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        check_quota(self.quota, others + key.len() + value.len())?;

        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));

        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("missing").is_ok());
    }

    #[test]
    fn test_quota_exceeded_leaves_previous_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "short").unwrap();

        let err = storage.set_item("k", "much too long value").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(8);
        storage.set_item("k", "1234567").unwrap();
        // Replacing the same key must not count the old value.
        storage.set_item("k", "7654321").unwrap();
        assert_eq!(storage.len(), 1);
    }
}
