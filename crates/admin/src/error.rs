//! Unified error handling for admin.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::{AdminAuthError, BackupError, CatalogError};

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication failed or is required.
    #[error("Auth error: {0}")]
    Auth(#[from] AdminAuthError),

    /// Catalog edit rejected or failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Export or import failed.
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),
}

impl AdminError {
    /// The authentication error underneath, if any.
    #[must_use]
    pub fn auth(&self) -> Option<&AdminAuthError> {
        match self {
            Self::Auth(e) | Self::Catalog(CatalogError::Auth(e)) | Self::Backup(BackupError::Auth(e)) => {
                Some(e)
            }
            _ => None,
        }
    }

    /// Text safe to show to the admin.
    ///
    /// Credential failures stay generic; key derivation and join failures are
    /// logged and collapsed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.auth() {
            Some(AdminAuthError::InvalidCredentials) => "Invalid email or password".to_string(),
            Some(AdminAuthError::NotLoggedIn) => "Please log in first".to_string(),
            Some(AdminAuthError::KeyDerivation(_) | AdminAuthError::TaskJoin(_)) => {
                tracing::error!(error = %self, "Admin error");
                "Internal error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type alias for `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;
