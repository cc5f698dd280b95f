//! Admin credential record.
//!
//! The record only carries the derivation parameters and the derived key;
//! hashing itself lives in the admin crate.

use serde::{Deserialize, Serialize};

use crate::Email;

/// Length of the random salt in bytes (hex-encoded as 32 characters).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (hex-encoded as 64 characters).
pub const HASH_LEN: usize = 32;

/// Structural problems found in an [`AdminCredential`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Salt is not `2 * SALT_LEN` lowercase hex characters.
    #[error("admin salt must be {} hex characters", SALT_LEN * 2)]
    MalformedSalt,
    /// Hash is not `2 * HASH_LEN` lowercase hex characters.
    #[error("admin hash must be {} hex characters", HASH_LEN * 2)]
    MalformedHash,
    /// Iteration count is zero.
    #[error("admin iterations must be positive")]
    ZeroIterations,
}

/// The single admin credential persisted inside the store record.
///
/// Field names match the persisted JSON: `{ email, hash, salt, iterations }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    /// Admin login email, stored lowercase.
    pub email: Email,
    /// Hex-encoded derived key.
    pub hash: String,
    /// Hex-encoded random salt.
    pub salt: String,
    /// Derivation iteration count, fixed when the credential is created.
    pub iterations: u32,
}

impl AdminCredential {
    /// Check that salt, hash and iteration count are well formed.
    ///
    /// # Errors
    ///
    /// Returns the first [`CredentialError`] found.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if !is_lower_hex(&self.salt, SALT_LEN * 2) {
            return Err(CredentialError::MalformedSalt);
        }
        if !is_lower_hex(&self.hash, HASH_LEN * 2) {
            return Err(CredentialError::MalformedHash);
        }
        if self.iterations == 0 {
            return Err(CredentialError::ZeroIterations);
        }
        Ok(())
    }
}

fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn credential() -> AdminCredential {
        AdminCredential {
            email: Email::parse("admin@projecta.local").unwrap(),
            hash: "ab".repeat(HASH_LEN),
            salt: "0f".repeat(SALT_LEN),
            iterations: 150_000,
        }
    }

    #[test]
    fn test_valid_credential() {
        assert!(credential().validate().is_ok());
    }

    #[test]
    fn test_malformed_salt() {
        let mut c = credential();
        c.salt = "XYZ".to_string();
        assert_eq!(c.validate(), Err(CredentialError::MalformedSalt));
    }

    #[test]
    fn test_uppercase_hash_rejected() {
        let mut c = credential();
        c.hash = "AB".repeat(HASH_LEN);
        assert_eq!(c.validate(), Err(CredentialError::MalformedHash));
    }

    #[test]
    fn test_zero_iterations() {
        let mut c = credential();
        c.iterations = 0;
        assert_eq!(c.validate(), Err(CredentialError::ZeroIterations));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(credential()).unwrap();
        assert_eq!(json["email"], "admin@projecta.local");
        assert_eq!(json["iterations"], 150_000);
        assert!(json["salt"].is_string());
        assert!(json["hash"].is_string());
    }
}
