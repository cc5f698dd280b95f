//! Admin services.
//!
//! - `auth` - Credential bootstrap, login/logout, password change
//! - `catalog` - Product CRUD, images and site copy
//! - `backup` - JSON export and validated import

pub mod auth;
pub mod backup;
pub mod catalog;

pub use auth::{AdminAuthError, AdminAuthService};
pub use backup::{BackupError, BackupService};
pub use catalog::{CatalogEditor, CatalogError, UpsertOutcome};
