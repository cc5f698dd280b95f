//! Cart persistence.

use tracing::instrument;

use projecta_core::KeyValueStore;

use super::{RepositoryError, keys, read_list_or_empty, write_json};
use crate::models::CartItem;

/// Repository for the cart line items.
pub struct CartRepository<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// Load the cart. Missing or unreadable carts load as empty.
    #[must_use]
    pub fn load(&self) -> Vec<CartItem> {
        read_list_or_empty(self.storage, keys::CART)
    }

    /// Persist the full cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub fn save(&self, items: &[CartItem]) -> Result<(), RepositoryError> {
        write_json(self.storage, keys::CART, items)
    }

    /// Remove the cart key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the key cannot be removed.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.storage.remove_item(keys::CART)?;
        Ok(())
    }
}
