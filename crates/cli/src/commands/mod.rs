//! Command implementations.
//!
//! Every command opens the file-backed store described by
//! [`StorefrontConfig`]. Admin login state lives in an in-memory session
//! store that ends with the process.

pub mod admin;
pub mod cart;
pub mod consent;
pub mod contact;
pub mod products;
pub mod store;

use std::sync::Arc;

use projecta_core::KeyValueStore;
use projecta_storefront::config::StorefrontConfig;
use projecta_storefront::storage::{MemoryStorage, SharedStorage};

/// Storage handles shared by all commands.
pub struct Context {
    storage: SharedStorage,
    session: MemoryStorage,
}

impl Context {
    /// Open storage from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the data
    /// directory cannot be created.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = StorefrontConfig::from_env()?;
        let storage = config.open_storage()?;
        tracing::debug!(dir = %config.data_dir.display(), "Opened storage");
        Ok(Self {
            storage: Arc::new(storage),
            session: MemoryStorage::new(),
        })
    }

    /// Persistent store.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Process-lifetime session store.
    #[must_use]
    pub fn session(&self) -> &dyn KeyValueStore {
        &self.session
    }
}
