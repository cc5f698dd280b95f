//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PROJECTA_DATA_DIR` - Directory backing persistent storage (default: `.projecta`)
//! - `PROJECTA_STORAGE_QUOTA_BYTES` - Storage quota in bytes (default: 5 MiB)

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{DEFAULT_QUOTA_BYTES, FileStorage, StorageError};

/// Default storage directory.
pub const DEFAULT_DATA_DIR: &str = ".projecta";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding one file per storage key
    pub data_dir: PathBuf,
    /// Maximum total size of stored keys and values
    pub storage_quota_bytes: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the quota is not a positive
    /// integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(&lookup, "PROJECTA_DATA_DIR", DEFAULT_DATA_DIR));

        let storage_quota_bytes = match lookup("PROJECTA_STORAGE_QUOTA_BYTES") {
            None => DEFAULT_QUOTA_BYTES,
            Some(raw) => parse_quota(&raw)?,
        };

        Ok(Self {
            data_dir,
            storage_quota_bytes,
        })
    }

    /// Open the file-backed store this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the directory cannot be created.
    pub fn open_storage(&self) -> Result<FileStorage, StorageError> {
        Ok(FileStorage::open(self.data_dir.clone())?.with_quota(self.storage_quota_bytes))
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_quota(raw: &str) -> Result<usize, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("PROJECTA_STORAGE_QUOTA_BYTES".to_string(), reason.to_string())
    };
    let quota: usize = raw
        .trim()
        .parse()
        .map_err(|_| invalid("must be a positive integer"))?;
    if quota == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(quota)
}
