//! Repositories over the key-value store.
//!
//! # Keys
//!
//! Each record is one JSON document under one key:
//!
//! - `projecta_data` - store record (catalog, site copy, admin credential)
//! - `projecta-cart` - cart line items
//! - `projecta_messages` - contact form submissions
//! - `cookieConsent` - cookie banner choice (plain string)
//! - `projecta_admin_logged` - admin session flag (session storage only)
//!
//! Every write replaces the whole document. Reads that fail to parse are
//! logged and recovered locally by the repository that owns the key.

pub mod cart;
pub mod consent;
pub mod messages;
pub mod store;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use projecta_core::{KeyValueStore, StorageError};

pub use cart::CartRepository;
pub use consent::ConsentRepository;
pub use messages::MessageRepository;
pub use store::StoreRepository;

/// Storage keys.
pub mod keys {
    /// Store record.
    pub const STORE: &str = "projecta_data";

    /// Cart line items.
    pub const CART: &str = "projecta-cart";

    /// Contact form submissions.
    pub const MESSAGES: &str = "projecta_messages";

    /// Cookie banner choice.
    pub const COOKIE_CONSENT: &str = "cookieConsent";

    /// Admin session flag, kept in session-scoped storage.
    pub const ADMIN_LOGGED: &str = "projecta_admin_logged";
}

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed (quota exceeded, unavailable, I/O).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be serialized or parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of reading a JSON document.
#[derive(Debug)]
pub enum Loaded<T> {
    /// Key absent.
    Missing,
    /// Key present and parsed.
    Found(T),
}

/// Read and parse the document under `key`.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the read fails and
/// `RepositoryError::Serialization` if the document does not parse.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Loaded<T>, RepositoryError> {
    match storage.get_item(key)? {
        None => Ok(Loaded::Missing),
        Some(raw) => Ok(Loaded::Found(serde_json::from_str(&raw)?)),
    }
}

/// Serialize `value` and store it under `key`.
///
/// # Errors
///
/// Returns `RepositoryError::Serialization` or `RepositoryError::Storage`.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), RepositoryError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)?;
    Ok(())
}

/// Read a JSON array, treating a missing key or unreadable document as empty.
pub(crate) fn read_list_or_empty<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Vec<T> {
    match read_json::<Vec<T>>(storage, key) {
        Ok(Loaded::Found(items)) => items,
        Ok(Loaded::Missing) => Vec::new(),
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to load list, starting empty");
            Vec::new()
        }
    }
}
