//! Integration tests for Projecta.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p projecta-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Catalog, cart, contact and consent over file storage
//! - `admin_flow` - Bootstrap, login, catalog editing and backup round trips

use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;

use projecta_admin::config::BootstrapCredential;
use projecta_core::{Email, KeyValueStore};
use projecta_storefront::storage::{FileStorage, MemoryStorage};

/// Iteration count for test credentials; low so tests stay fast.
pub const TEST_ITERATIONS: u32 = 1_000;

/// Admin email used by the tests.
pub const TEST_ADMIN_EMAIL: &str = "admin@projecta.local";

/// Admin password used by the tests.
pub const TEST_ADMIN_PASSWORD: &str = "integration-pass";

/// A file-backed store in a temporary directory plus a fresh session.
pub struct TestContext {
    pub dir: TempDir,
    pub storage: FileStorage,
    pub session: MemoryStorage,
}

impl TestContext {
    /// Create a new context.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::open(dir.path().join("data")).expect("Failed to open storage");
        Self {
            dir,
            storage,
            session: MemoryStorage::new(),
        }
    }

    /// Reopen the same data directory, as a new process would.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be opened.
    #[must_use]
    pub fn reopen(&self) -> FileStorage {
        FileStorage::open(self.storage.dir()).expect("Failed to reopen storage")
    }

    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        &self.storage
    }

    #[must_use]
    pub fn session(&self) -> &dyn KeyValueStore {
        &self.session
    }

    /// Path for a scratch file inside the temporary directory.
    #[must_use]
    pub fn file(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.storage.dir()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Bootstrap credential for the test admin.
///
/// # Panics
///
/// Panics if the test email constant is invalid.
#[must_use]
pub fn test_bootstrap() -> BootstrapCredential {
    BootstrapCredential {
        email: Email::parse(TEST_ADMIN_EMAIL).expect("valid email"),
        password: SecretString::from(TEST_ADMIN_PASSWORD),
        iterations: TEST_ITERATIONS,
    }
}
