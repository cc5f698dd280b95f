//! Key-value storage seam.
//!
//! Every persisted record (store, cart, message log, consent, session flag)
//! is a JSON string under a single key, mirroring the browser `Storage` API.
//! Backends live in the storefront crate; callers receive them as
//! `Arc<dyn KeyValueStore>`.

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Writing the value would exceed the backend's byte quota.
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Total bytes the backend would hold after the write.
        needed: usize,
        /// Configured quota in bytes.
        limit: usize,
    },

    /// The backend cannot be used at all (disabled, missing directory, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// An I/O operation failed.
    #[error("storage I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// A string-to-string store with browser `localStorage` semantics.
///
/// Writes replace the whole value for a key. There is no compare-and-swap;
/// concurrent read-modify-write cycles may lose updates.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] if the value does not fit, or
    /// another [`StorageError`] if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
