//! Admin authentication service.
//!
//! A single admin credential lives in the store record. Passwords are
//! verified by re-deriving the PBKDF2 key with the stored salt and iteration
//! count and comparing in constant time. Login state is a session flag kept
//! outside the store.

mod error;
pub mod password;

pub use error::AdminAuthError;

use secrecy::SecretString;
use tracing::{debug, info, instrument, warn};

use projecta_core::{AdminCredential, Email, KeyValueStore};
use projecta_storefront::db::StoreRepository;

use crate::config::BootstrapCredential;
use crate::session::AdminSession;
use password::{check_password_strength, derive_key_blocking, generate_salt, keys_match};

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    store: StoreRepository<'a>,
    session: AdminSession<'a>,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    ///
    /// `storage` holds the store record; `session` holds the login flag.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore, session: &'a dyn KeyValueStore) -> Self {
        Self {
            store: StoreRepository::new(storage),
            session: AdminSession::new(session),
        }
    }

    /// Create the admin credential from `bootstrap` if none exists yet.
    ///
    /// # Returns
    ///
    /// `true` if a credential was written, `false` if one already existed.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::WeakPassword` if the bootstrap password is
    /// too short, or `AdminAuthError::Repository` if the store cannot be saved.
    #[instrument(skip(self, bootstrap), fields(email = %bootstrap.email))]
    pub async fn ensure_admin_exists(
        &self,
        bootstrap: &BootstrapCredential,
    ) -> Result<bool, AdminAuthError> {
        let mut store = self.store.get_data();
        if store.admin.is_some() {
            debug!("Admin credential already present");
            return Ok(false);
        }

        check_password_strength(&bootstrap.password)?;
        let credential = new_credential(
            bootstrap.email.clone(),
            bootstrap.password.clone(),
            bootstrap.iterations,
        )
        .await?;

        store.admin = Some(credential);
        self.store.save_data(&store)?;
        info!("Created admin credential");
        Ok(true)
    }

    /// Check the credential and mark the session logged in.
    ///
    /// The email is trimmed and compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` for any mismatch or when
    /// no admin exists, or `AdminAuthError::Repository` if the session flag
    /// cannot be written.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<(), AdminAuthError> {
        let Some(admin) = self.store.get_data().admin else {
            warn!("Login attempted with no admin credential");
            return Err(AdminAuthError::InvalidCredentials);
        };

        if !admin.email.matches_ignore_case(email) {
            warn!("Login failed");
            return Err(AdminAuthError::InvalidCredentials);
        }

        if !verify(&admin, password).await? {
            warn!("Login failed");
            return Err(AdminAuthError::InvalidCredentials);
        }

        self.session.set_logged_in()?;
        info!("Admin logged in");
        Ok(())
    }

    /// Clear the session flag.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::Repository` if the flag cannot be removed.
    pub fn logout(&self) -> Result<(), AdminAuthError> {
        self.session.clear()?;
        info!("Admin logged out");
        Ok(())
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Replace the password, keeping email and iteration count.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::NotLoggedIn` without a session,
    /// `AdminAuthError::InvalidCredentials` if `current` is wrong, and
    /// `AdminAuthError::WeakPassword` if `new` fails the policy.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> Result<(), AdminAuthError> {
        self.session.require_logged_in()?;
        check_password_strength(new)?;

        let mut store = self.store.get_data();
        let Some(admin) = store.admin.take() else {
            return Err(AdminAuthError::InvalidCredentials);
        };
        if !verify(&admin, current).await? {
            warn!("Password change rejected");
            return Err(AdminAuthError::InvalidCredentials);
        }

        store.admin = Some(new_credential(admin.email, new.clone(), admin.iterations).await?);
        self.store.save_data(&store)?;
        info!("Admin password changed");
        Ok(())
    }
}

async fn new_credential(
    email: Email,
    password: SecretString,
    iterations: u32,
) -> Result<AdminCredential, AdminAuthError> {
    let salt = generate_salt();
    let hash = derive_key_blocking(password, salt.clone(), iterations).await?;
    Ok(AdminCredential {
        email,
        hash,
        salt,
        iterations,
    })
}

async fn verify(admin: &AdminCredential, password: &SecretString) -> Result<bool, AdminAuthError> {
    let derived =
        derive_key_blocking(password.clone(), admin.salt.clone(), admin.iterations).await?;
    Ok(keys_match(&derived, &admin.hash))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use projecta_storefront::db::keys;
    use projecta_storefront::storage::MemoryStorage;

    use super::*;

    const ITERATIONS: u32 = 1_000;

    fn bootstrap(password: &str) -> BootstrapCredential {
        BootstrapCredential {
            email: Email::parse("admin@projecta.local").unwrap(),
            password: SecretString::from(password),
            iterations: ITERATIONS,
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s)
    }

    #[tokio::test]
    async fn test_bootstrap_creates_verifiable_credential() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);

        assert!(auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap());

        let admin = StoreRepository::new(&storage).get_data().admin.unwrap();
        admin.validate().unwrap();
        assert_eq!(admin.iterations, ITERATIONS);

        auth.login("admin@projecta.local", &secret("s3cret-pass"))
            .await
            .unwrap();
        assert!(auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);

        auth.ensure_admin_exists(&bootstrap("first-password")).await.unwrap();
        let before = StoreRepository::new(&storage).get_data().admin;
        assert!(!auth.ensure_admin_exists(&bootstrap("second-password")).await.unwrap());
        assert_eq!(StoreRepository::new(&storage).get_data().admin, before);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_weak_password() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);

        assert!(matches!(
            auth.ensure_admin_exists(&bootstrap("short")).await,
            Err(AdminAuthError::WeakPassword(_))
        ));
        assert!(StoreRepository::new(&storage).get_data().admin.is_none());
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);
        auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap();

        auth.login("  Admin@Projecta.LOCAL ", &secret("s3cret-pass"))
            .await
            .unwrap();
        assert!(auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_failures_are_generic() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);

        // No admin yet.
        assert!(matches!(
            auth.login("admin@projecta.local", &secret("anything")).await,
            Err(AdminAuthError::InvalidCredentials)
        ));

        auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap();
        for (email, password) in [
            ("other@projecta.local", "s3cret-pass"),
            ("admin@projecta.local", "wrong-pass"),
            ("admin@projecta.local", "S3cret-pass"),
        ] {
            let err = auth.login(email, &secret(password)).await.unwrap_err();
            assert!(matches!(err, AdminAuthError::InvalidCredentials));
            assert_eq!(err.to_string(), "invalid email or password");
        }
        assert!(!auth.is_logged_in());
        assert!(session.get_item(keys::ADMIN_LOGGED).unwrap().is_none());
    }

    fn flip_first_hex_digit(hex: &str) -> String {
        let mut chars = hex.chars();
        let first = if chars.next() == Some('0') { '1' } else { '0' };
        std::iter::once(first).chain(chars).collect()
    }

    #[tokio::test]
    async fn test_any_altered_credential_field_fails_login() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);
        auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap();

        let store = StoreRepository::new(&storage);
        let original = store.get_data();
        let admin = original.admin.clone().unwrap();

        let altered = [
            AdminCredential {
                salt: flip_first_hex_digit(&admin.salt),
                ..admin.clone()
            },
            AdminCredential {
                iterations: admin.iterations + 1,
                ..admin.clone()
            },
            AdminCredential {
                hash: flip_first_hex_digit(&admin.hash),
                ..admin.clone()
            },
        ];
        for credential in altered {
            let mut data = original.clone();
            data.admin = Some(credential);
            store.save_data(&data).unwrap();

            assert!(matches!(
                auth.login("admin@projecta.local", &secret("s3cret-pass")).await,
                Err(AdminAuthError::InvalidCredentials)
            ));
            assert!(!auth.is_logged_in());
        }

        store.save_data(&original).unwrap();
        auth.login("admin@projecta.local", &secret("s3cret-pass"))
            .await
            .unwrap();
        assert!(auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_state_is_not_persisted_in_store() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);
        auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap();
        auth.login("admin@projecta.local", &secret("s3cret-pass"))
            .await
            .unwrap();

        assert!(storage.get_item(keys::ADMIN_LOGGED).unwrap().is_none());

        // A fresh session over the same store starts logged out.
        let fresh_session = MemoryStorage::new();
        assert!(!AdminAuthService::new(&storage, &fresh_session).is_logged_in());
    }

    #[tokio::test]
    async fn test_logout() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);
        auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap();
        auth.login("admin@projecta.local", &secret("s3cret-pass"))
            .await
            .unwrap();

        auth.logout().unwrap();
        assert!(!auth.is_logged_in());
        assert!(StoreRepository::new(&storage).get_data().admin.is_some());
    }

    #[tokio::test]
    async fn test_change_password() {
        let storage = MemoryStorage::new();
        let session = MemoryStorage::new();
        let auth = AdminAuthService::new(&storage, &session);
        auth.ensure_admin_exists(&bootstrap("s3cret-pass")).await.unwrap();

        assert!(matches!(
            auth.change_password(&secret("s3cret-pass"), &secret("new-password"))
                .await,
            Err(AdminAuthError::NotLoggedIn)
        ));

        auth.login("admin@projecta.local", &secret("s3cret-pass"))
            .await
            .unwrap();
        let old = StoreRepository::new(&storage).get_data().admin.unwrap();

        assert!(matches!(
            auth.change_password(&secret("wrong-pass"), &secret("new-password"))
                .await,
            Err(AdminAuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.change_password(&secret("s3cret-pass"), &secret("short"))
                .await,
            Err(AdminAuthError::WeakPassword(_))
        ));

        auth.change_password(&secret("s3cret-pass"), &secret("new-password"))
            .await
            .unwrap();
        let new = StoreRepository::new(&storage).get_data().admin.unwrap();
        assert_ne!(new.salt, old.salt);
        assert_eq!(new.iterations, old.iterations);

        auth.logout().unwrap();
        assert!(auth
            .login("admin@projecta.local", &secret("s3cret-pass"))
            .await
            .is_err());
        auth.login("admin@projecta.local", &secret("new-password"))
            .await
            .unwrap();
    }
}
