//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PROJECTA_ADMIN_EMAIL` - Admin login email (default: `admin@projecta.local`)
//! - `PROJECTA_ADMIN_PASSWORD` - Bootstrap and login password
//! - `PROJECTA_PBKDF2_ITERATIONS` - Key derivation rounds for new credentials (default: 150000)

use secrecy::SecretString;
use thiserror::Error;

use projecta_core::Email;

/// Default admin login email.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@projecta.local";

/// Default PBKDF2 iteration count.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 150_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    /// Admin login email, normalized to lowercase
    pub admin_email: Email,
    /// Admin password, if provided
    pub admin_password: Option<SecretString>,
    /// Iteration count used when a credential is created
    pub pbkdf2_iterations: u32,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("admin_email", &self.admin_email)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("pbkdf2_iterations", &self.pbkdf2_iterations)
            .finish()
    }
}

/// The credential written when no admin exists yet.
#[derive(Clone)]
pub struct BootstrapCredential {
    pub email: Email,
    pub password: SecretString,
    pub iterations: u32,
}

impl std::fmt::Debug for BootstrapCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapCredential")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the email does not parse or the
    /// iteration count is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`AdminConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_email = lookup("PROJECTA_ADMIN_EMAIL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
        let admin_email = Email::normalized(&raw_email).map_err(|e| {
            ConfigError::InvalidEnvVar("PROJECTA_ADMIN_EMAIL".to_string(), e.to_string())
        })?;

        let admin_password = lookup("PROJECTA_ADMIN_PASSWORD")
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let pbkdf2_iterations = match lookup("PROJECTA_PBKDF2_ITERATIONS") {
            None => DEFAULT_PBKDF2_ITERATIONS,
            Some(raw) => parse_iterations(&raw)?,
        };

        Ok(Self {
            admin_email,
            admin_password,
            pbkdf2_iterations,
        })
    }

    /// The bootstrap credential, if a password is configured.
    #[must_use]
    pub fn bootstrap(&self) -> Option<BootstrapCredential> {
        self.admin_password
            .clone()
            .map(|password| BootstrapCredential {
                email: self.admin_email.clone(),
                password,
                iterations: self.pbkdf2_iterations,
            })
    }

    /// The configured password.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `PROJECTA_ADMIN_PASSWORD` is unset.
    pub fn require_password(&self) -> Result<&SecretString, ConfigError> {
        self.admin_password
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("PROJECTA_ADMIN_PASSWORD".to_string()))
    }
}

fn parse_iterations(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("PROJECTA_PBKDF2_ITERATIONS".to_string(), reason.to_string())
    };
    let iterations: u32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("must be a positive integer"))?;
    if iterations == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(iterations)
}
