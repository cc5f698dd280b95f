//! Admin login email.
//!
//! The stored admin address is kept in its [`Email::normalized`] form, and
//! login input is compared with [`Email::matches_ignore_case`], so casing and
//! stray whitespace typed into the login form never lock the admin out.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string is not an [`Email`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// An address of the form `local@domain` with both halves non-empty.
///
/// ```
/// use projecta_core::Email;
///
/// assert!(Email::parse("admin@projecta.local").is_ok());
/// assert!(Email::parse("admin@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 limit.
    pub const MAX_LENGTH: usize = 254;

    /// Validate `s` as-is.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] that applies.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Trim, lowercase, then [`Email::parse`].
    ///
    /// # Errors
    ///
    /// Same as [`Email::parse`].
    pub fn normalized(s: &str) -> Result<Self, EmailError> {
        Self::parse(&s.trim().to_lowercase())
    }

    /// Compare against raw login input, ignoring case and surrounding
    /// whitespace.
    #[must_use]
    pub fn matches_ignore_case(&self, input: &str) -> bool {
        self.0.to_lowercase() == input.trim().to_lowercase()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
