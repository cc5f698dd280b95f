//! PBKDF2-HMAC-SHA256 key derivation.
//!
//! Salts and derived keys are stored as lowercase hex. Derivation is CPU
//! bound, so async callers go through [`derive_key_blocking`].

use hmac::Hmac;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use projecta_core::{HASH_LEN, SALT_LEN};

use super::AdminAuthError;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Fresh random salt, hex-encoded.
#[must_use]
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Derive the hex-encoded key for `password`.
///
/// # Errors
///
/// Returns `AdminAuthError::KeyDerivation` if `salt_hex` is not valid hex.
pub fn derive_key(password: &[u8], salt_hex: &str, iterations: u32) -> Result<String, AdminAuthError> {
    let salt = hex::decode(salt_hex)
        .map_err(|e| AdminAuthError::KeyDerivation(format!("invalid salt: {e}")))?;
    let mut key = [0u8; HASH_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, &salt, iterations, &mut key)
        .map_err(|e| AdminAuthError::KeyDerivation(e.to_string()))?;
    Ok(hex::encode(key))
}

/// [`derive_key`] on the blocking thread pool.
///
/// # Errors
///
/// Returns `AdminAuthError::KeyDerivation` for a malformed salt and
/// `AdminAuthError::TaskJoin` if the task fails.
pub async fn derive_key_blocking(
    password: SecretString,
    salt_hex: String,
    iterations: u32,
) -> Result<String, AdminAuthError> {
    tokio::task::spawn_blocking(move || {
        derive_key(password.expose_secret().as_bytes(), &salt_hex, iterations)
    })
    .await?
}

/// Compare two hex-encoded keys in constant time.
///
/// Malformed hex never matches.
#[must_use]
pub fn keys_match(derived_hex: &str, stored_hex: &str) -> bool {
    let (Ok(derived), Ok(stored)) = (hex::decode(derived_hex), hex::decode(stored_hex)) else {
        return false;
    };
    derived.as_slice().ct_eq(stored.as_slice()).into()
}

/// Enforce the password policy.
///
/// # Errors
///
/// Returns `AdminAuthError::WeakPassword` if the password is too short.
pub fn check_password_strength(password: &SecretString) -> Result<(), AdminAuthError> {
    let len = password.expose_secret().chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AdminAuthError::WeakPassword(format!(
            "must be at least {MIN_PASSWORD_LEN} characters (got {len})"
        )));
    }
    Ok(())
}
