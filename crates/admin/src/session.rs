//! Admin login state.
//!
//! The flag lives in session-scoped storage (a [`MemoryStorage`] for the
//! lifetime of a CLI process), never in the persistent store.
//!
//! [`MemoryStorage`]: projecta_storefront::storage::MemoryStorage

use projecta_core::{AdminSessionState, KeyValueStore};
use projecta_storefront::db::{RepositoryError, keys};

use crate::services::auth::AdminAuthError;

const LOGGED_IN: &str = "1";

/// View of the admin session flag.
pub struct AdminSession<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> AdminSession<'a> {
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// Current state. Unreadable flags count as logged out.
    #[must_use]
    pub fn state(&self) -> AdminSessionState {
        match self.storage.get_item(keys::ADMIN_LOGGED) {
            Ok(Some(flag)) if flag == LOGGED_IN => AdminSessionState::LoggedIn,
            Ok(_) => AdminSessionState::LoggedOut,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read admin session flag");
                AdminSessionState::LoggedOut
            }
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state() == AdminSessionState::LoggedIn
    }

    /// Fail with `AdminAuthError::NotLoggedIn` unless logged in.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::NotLoggedIn`.
    pub fn require_logged_in(&self) -> Result<(), AdminAuthError> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(AdminAuthError::NotLoggedIn)
        }
    }

    /// Set the flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected.
    pub fn set_logged_in(&self) -> Result<(), RepositoryError> {
        self.storage.set_item(keys::ADMIN_LOGGED, LOGGED_IN)?;
        Ok(())
    }

    /// Remove the flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the key cannot be removed.
    pub fn clear(&self) -> Result<(), RepositoryError> {
        self.storage.remove_item(keys::ADMIN_LOGGED)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use projecta_storefront::storage::MemoryStorage;

    use super::*;

    #[test]
    fn test_flag_lifecycle() {
        let storage = MemoryStorage::new();
        let session = AdminSession::new(&storage);
        assert_eq!(session.state(), AdminSessionState::LoggedOut);
        assert!(matches!(
            session.require_logged_in(),
            Err(AdminAuthError::NotLoggedIn)
        ));

        session.set_logged_in().unwrap();
        assert!(session.is_logged_in());
        assert_eq!(
            storage.get_item(keys::ADMIN_LOGGED).unwrap().as_deref(),
            Some("1")
        );

        session.clear().unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_other_values_are_logged_out() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::ADMIN_LOGGED, "true").unwrap();
        assert!(!AdminSession::new(&storage).is_logged_in());
    }
}
