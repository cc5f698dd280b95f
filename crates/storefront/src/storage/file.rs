//! File-backed storage backend.
//!
//! Each key maps to one file in the data directory. Writes go to a hidden
//! temp file first and are renamed into place, so a single `set_item` is
//! atomic on the same file system. Nothing spans more than one key.

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use projecta_core::{KeyValueStore, StorageError};

use super::check_quota;

/// Persistent storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Unavailable(format!("cannot create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir, quota: None })
    }

    /// Reject writes that would grow the directory beyond `quota` bytes.
    #[must_use]
    pub const fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// The directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(encode_key(key))
    }

    /// Bytes held by every key except `skip`, counting file name plus content.
    fn used_bytes_except(&self, skip: &str) -> Result<usize, StorageError> {
        let mut total = 0usize;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || name == skip {
                continue;
            }
            let len = usize::try_from(entry.metadata()?.len()).unwrap_or(usize::MAX);
            total = total.saturating_add(name.len()).saturating_add(len);
        }
        Ok(total)
    }
}

/// Encode a key as a portable file name.
///
/// ASCII alphanumerics, `-` and `_` pass through; everything else becomes
/// `%XX` per UTF-8 byte.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
            out.push(char::from(b));
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let name = encode_key(key);
        if self.quota.is_some() {
            let used = self.used_bytes_except(&name)?;
            check_quota(self.quota, used + name.len() + value.len())?;
        }

        let tmp = self.dir.join(format!(".{name}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.dir.join(&name))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("projecta_data"), "projecta_data");
        assert_eq!(encode_key("projecta-cart"), "projecta-cart");
        assert_eq!(encode_key("../etc"), "%2E%2E%2Fetc");
    }

    #[test]
    fn test_roundtrip_and_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        storage.set_item("projecta_data", "{\"a\":1}").unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get_item("projecta_data").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn test_missing_key_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get_item("nope").unwrap(), None);
        assert!(storage.remove_item("nope").is_ok());

        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_quota() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap().with_quota(16);
        storage.set_item("a", "0123456789").unwrap();

        let err = storage.set_item("b", "0123456789").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert_eq!(storage.get_item("b").unwrap(), None);

        // Overwriting an existing key only counts the new value.
        storage.set_item("a", "9876543210").unwrap();
    }
}
