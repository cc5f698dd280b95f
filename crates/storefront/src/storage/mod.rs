//! Storage backends implementing [`KeyValueStore`].
//!
//! - [`MemoryStorage`] - process-local map; session state and test double
//! - [`FileStorage`] - one file per key under a data directory
//!
//! Both enforce an optional byte quota the way browsers cap `localStorage`,
//! counting the UTF-8 length of every key and value held.

mod file;
mod memory;

use std::sync::Arc;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use projecta_core::{KeyValueStore, StorageError};

/// Browser-like default quota for persistent storage (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn KeyValueStore>;

/// Fail with [`StorageError::QuotaExceeded`] if `needed` exceeds `quota`.
fn check_quota(quota: Option<usize>, needed: usize) -> Result<(), StorageError> {
    match quota {
        Some(limit) if needed > limit => Err(StorageError::QuotaExceeded { needed, limit }),
        _ => Ok(()),
    }
}
