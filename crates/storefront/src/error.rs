//! Unified error handling.
//!
//! Provides a unified `AppError` that front ends convert service errors into
//! before showing anything to a shopper. Storage and serialization details
//! are logged, never displayed.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{CartError, ContactError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Cart operation rejected or failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Contact form rejected or failed.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text safe to show to a shopper.
    ///
    /// Failures below the service layer are logged here and collapsed into a
    /// generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Repository(_)
            | Self::Internal(_)
            | Self::Cart(CartError::Repository(_))
            | Self::Contact(ContactError::Repository(_)) => {
                tracing::error!(error = %self, "Storefront error");
                "Something went wrong, please try again.".to_string()
            }
            Self::Cart(err) => err.to_string(),
            Self::Contact(ContactError::MissingFields(_)) => {
                "Please fill in all fields.".to_string()
            }
            Self::NotFound(what) => format!("{what} not found"),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
