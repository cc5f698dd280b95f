//! JSON backup export and import.
//!
//! Exports are the store record pretty-printed with two-space indentation.
//! Imports are parsed and validated in full before the store is replaced, so
//! a rejected file never changes anything.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument, warn};

use projecta_core::KeyValueStore;
use projecta_storefront::db::{RepositoryError, StoreRepository};
use projecta_storefront::models::StoreRecord;

use super::auth::AdminAuthError;
use crate::session::AdminSession;

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "projecta_data.json";

/// Errors from export and import.
#[derive(Debug, Error)]
pub enum BackupError {
    /// Not logged in.
    #[error(transparent)]
    Auth(#[from] AdminAuthError),

    /// The file is not JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The file is JSON but not a valid store record.
    #[error("invalid store data: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Reading or writing the backup file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store could not be read or saved.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Backup service.
pub struct BackupService<'a> {
    store: StoreRepository<'a>,
    session: AdminSession<'a>,
}

impl<'a> BackupService<'a> {
    /// Create a new backup service.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, session: &'a dyn KeyValueStore) -> Self {
        Self {
            store: StoreRepository::new(storage),
            session: AdminSession::new(session),
        }
    }

    /// The store record as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Auth` without a session.
    pub fn export_store(&self) -> Result<String, BackupError> {
        self.session.require_logged_in()?;
        let store = self.store.get_data();
        serde_json::to_string_pretty(&store)
            .map_err(|e| BackupError::Repository(RepositoryError::Serialization(e)))
    }

    /// Write the export to `path`.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Io` if the file cannot be written.
    #[instrument(skip(self))]
    pub fn export_to_file(&self, path: &Path) -> Result<(), BackupError> {
        let json = self.export_store()?;
        std::fs::write(path, json).map_err(|source| BackupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Exported store");
        Ok(())
    }

    /// Validate `json` and replace the store with it.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::InvalidJson` for malformed JSON and
    /// `BackupError::Validation` listing every schema problem. The store is
    /// unchanged in both cases.
    #[instrument(skip(self, json), fields(bytes = json.len()))]
    pub fn import_store(&self, json: &str) -> Result<StoreRecord, BackupError> {
        self.session.require_logged_in()?;

        let record = parse_store(json).inspect_err(|e| warn!(error = %e, "Rejected import"))?;
        self.store.save_data(&record)?;
        info!(products = record.products.len(), "Imported store");
        Ok(record)
    }

    /// Read `path` and import it.
    ///
    /// # Errors
    ///
    /// Returns `BackupError::Io` if the file cannot be read, otherwise as
    /// [`BackupService::import_store`].
    pub fn import_from_file(&self, path: &Path) -> Result<StoreRecord, BackupError> {
        self.session.require_logged_in()?;
        let json = std::fs::read_to_string(path).map_err(|source| BackupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_store(&json)
    }
}

/// Parse and validate a store record.
///
/// # Errors
///
/// See [`BackupService::import_store`].
pub fn parse_store(json: &str) -> Result<StoreRecord, BackupError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(BackupError::InvalidJson)?;
    if !value.is_object() {
        return Err(BackupError::Validation(vec![
            "top-level value must be an object".to_string(),
        ]));
    }

    let record: StoreRecord =
        serde_json::from_value(value).map_err(|e| BackupError::Validation(vec![e.to_string()]))?;

    let problems = validate(&record);
    if problems.is_empty() {
        Ok(record)
    } else {
        Err(BackupError::Validation(problems))
    }
}

fn validate(record: &StoreRecord) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for (index, product) in record.products.iter().enumerate() {
        if product.id.is_blank() {
            problems.push(format!("products[{index}]: id cannot be empty"));
        } else if !seen.insert(product.id.as_str()) {
            problems.push(format!("products[{index}]: duplicate id {}", product.id));
        }
    }

    if let Some(Err(e)) = record.admin.as_ref().map(|admin| admin.validate()) {
        problems.push(format!("admin: {e}"));
    }

    problems
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use projecta_core::Price;
    use projecta_storefront::db::keys;
    use projecta_storefront::storage::MemoryStorage;

    use super::*;

    fn logged_in() -> (MemoryStorage, MemoryStorage) {
        let session = MemoryStorage::new();
        AdminSession::new(&session).set_logged_in().unwrap();
        (MemoryStorage::new(), session)
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let (storage, session) = logged_in();
        let backup = BackupService::new(&storage, &session);
        let json = backup.export_store().unwrap();
        assert!(json.starts_with("{\n  \"products\": [\n    {"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let (storage, session) = logged_in();
        let backup = BackupService::new(&storage, &session);
        let original = StoreRepository::new(&storage).get_data();

        let json = backup.export_store().unwrap();
        StoreRepository::new(&storage).reset().unwrap();
        let imported = backup.import_store(&json).unwrap();

        assert_eq!(imported, original);
        assert_eq!(StoreRepository::new(&storage).get_data(), original);
    }

    #[test]
    fn test_round_trip_keeps_extreme_prices() {
        let (storage, session) = logged_in();
        let store = StoreRepository::new(&storage);
        let mut data = store.get_data();
        for (product, price) in data
            .products
            .iter_mut()
            .zip(["1234567.891234567891", "9999999999.99", "0.1"])
        {
            product.price = Price::parse(price).unwrap();
        }
        store.save_data(&data).unwrap();

        let json = BackupService::new(&storage, &session).export_store().unwrap();
        let fresh = MemoryStorage::new();
        let imported = BackupService::new(&fresh, &session)
            .import_store(&json)
            .unwrap();

        assert_eq!(imported, data);
        assert_eq!(StoreRepository::new(&fresh).get_data(), data);
    }

    #[test]
    fn test_invalid_json_leaves_store_unchanged() {
        let (storage, session) = logged_in();
        let backup = BackupService::new(&storage, &session);
        StoreRepository::new(&storage).get_data();
        let before = storage.get_item(keys::STORE).unwrap();

        assert!(matches!(
            backup.import_store("{\"products\": ["),
            Err(BackupError::InvalidJson(_))
        ));
        assert_eq!(storage.get_item(keys::STORE).unwrap(), before);
    }

    #[test]
    fn test_schema_violations_rejected() {
        let (storage, session) = logged_in();
        let backup = BackupService::new(&storage, &session);
        StoreRepository::new(&storage).get_data();
        let before = storage.get_item(keys::STORE).unwrap();

        for json in [
            "[]",
            r#"{"products": [{"id": "p1", "title": "A", "price": -1}]}"#,
            r#"{"products": [{"id": "p1", "title": "A", "price": "free"}]}"#,
            r#"{"products": "none"}"#,
        ] {
            assert!(
                matches!(backup.import_store(json), Err(BackupError::Validation(_))),
                "{json}"
            );
        }
        assert_eq!(storage.get_item(keys::STORE).unwrap(), before);
    }

    #[test]
    fn test_duplicate_and_blank_ids_listed() {
        let json = r#"{"products": [
            {"id": "p1", "title": "A", "price": 1},
            {"id": "p1", "title": "B", "price": 2},
            {"id": " ", "title": "C", "price": 3}
        ]}"#;
        let Err(BackupError::Validation(problems)) = parse_store(json) else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("duplicate id p1"));
        assert!(problems[1].contains("id cannot be empty"));
    }

    #[test]
    fn test_malformed_admin_rejected() {
        let json = r#"{"products": [], "admin": {
            "email": "admin@projecta.local", "hash": "abc", "salt": "def", "iterations": 1
        }}"#;
        assert!(matches!(parse_store(json), Err(BackupError::Validation(_))));

        let json = r#"{"admin": {
            "email": "not-an-email", "hash": "", "salt": "", "iterations": 1
        }}"#;
        assert!(matches!(parse_store(json), Err(BackupError::Validation(_))));
    }

    #[test]
    fn test_legacy_record_without_optional_fields() {
        let json = r#"{"products": [{"id": "p1", "title": "A", "price": 129.0}]}"#;
        let record = parse_store(json).unwrap();
        assert!(record.products[0].images.is_empty());
        assert!(record.admin.is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let (storage, session) = logged_in();
        let backup = BackupService::new(&storage, &session);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        backup.export_to_file(&path).unwrap();
        StoreRepository::new(&storage).reset().unwrap();
        backup.import_from_file(&path).unwrap();
        assert_eq!(StoreRepository::new(&storage).get_data(), StoreRecord::seed());

        assert!(matches!(
            backup.import_from_file(&dir.path().join("missing.json")),
            Err(BackupError::Io { .. })
        ));
    }

    #[test]
    fn test_requires_login() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let backup = BackupService::new(&storage, &session);
        assert!(matches!(
            backup.export_store(),
            Err(BackupError::Auth(AdminAuthError::NotLoggedIn))
        ));
        assert!(matches!(
            backup.import_store("{}"),
            Err(BackupError::Auth(AdminAuthError::NotLoggedIn))
        ));
    }
}
