//! Cookie consent persistence.
//!
//! Stored as the bare string `accepted` / `rejected`, not JSON.

use projecta_core::{CookieConsent, KeyValueStore};

use super::{RepositoryError, keys};

/// Repository for the cookie banner choice.
pub struct ConsentRepository<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> ConsentRepository<'a> {
    /// Create a new consent repository.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// The stored choice, or `None` if the banner should still be shown.
    ///
    /// Unknown values read as `None`.
    #[must_use]
    pub fn get(&self) -> Option<CookieConsent> {
        match self.storage.get_item(keys::COOKIE_CONSENT) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read cookie consent");
                None
            }
        }
    }

    /// Persist a choice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected.
    pub fn set(&self, consent: CookieConsent) -> Result<(), RepositoryError> {
        self.storage.set_item(keys::COOKIE_CONSENT, consent.as_str())?;
        tracing::info!(%consent, "Cookie consent recorded");
        Ok(())
    }

    /// Record acceptance.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected.
    pub fn accept(&self) -> Result<(), RepositoryError> {
        self.set(CookieConsent::Accepted)
    }

    /// Record rejection.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Storage` if the write is rejected.
    pub fn reject(&self) -> Result<(), RepositoryError> {
        self.set(CookieConsent::Rejected)
    }
}
