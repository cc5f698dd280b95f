//! Contact message log.

use projecta_core::KeyValueStore;

use super::{RepositoryError, keys, read_list_or_empty, write_json};
use crate::models::ContactMessage;

/// Repository for stored contact form submissions.
pub struct MessageRepository<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// All stored messages, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<ContactMessage> {
        read_list_or_empty(self.storage, keys::MESSAGES)
    }

    /// Append one message to the log.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected.
    pub fn append(&self, message: ContactMessage) -> Result<(), RepositoryError> {
        let mut messages = self.list();
        messages.push(message);
        write_json(self.storage, keys::MESSAGES, &messages)
    }
}
