//! Admin authentication error types.

use thiserror::Error;

use projecta_storefront::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] projecta_core::EmailError),

    /// Email or password did not match. Deliberately does not say which.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Operation requires a logged-in admin.
    #[error("admin login required")]
    NotLoggedIn,

    /// New password rejected by the password policy.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Key derivation could not run (malformed salt or output length).
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The blocking derivation task panicked or was cancelled.
    #[error("key derivation task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// Repository/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
