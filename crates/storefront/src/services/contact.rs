//! Contact form.

use chrono::Utc;
use thiserror::Error;
use tracing::{info, instrument};

use projecta_core::KeyValueStore;

use crate::db::{MessageRepository, RepositoryError};
use crate::models::{ContactMessage, Notice, NoticeTarget};

/// Errors from contact form submission.
#[derive(Debug, Error)]
pub enum ContactError {
    /// One or more fields were blank after trimming.
    #[error("please fill in all fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The message could not be stored.
    #[error("failed to store message: {0}")]
    Repository(#[from] RepositoryError),
}

/// Raw form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub msg: String,
}

/// Contact form service.
pub struct ContactService<'a> {
    messages: MessageRepository<'a>,
}

impl<'a> ContactService<'a> {
    /// Create a new contact service.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self {
            messages: MessageRepository::new(storage),
        }
    }

    /// Validate and store a submission.
    ///
    /// All fields are trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingFields` naming the blank fields, or
    /// `ContactError::Repository` if the message log cannot be written.
    #[instrument(skip(self, form))]
    pub fn submit(&self, form: &ContactForm) -> Result<Notice, ContactError> {
        let name = form.name.trim();
        let email = form.email.trim();
        let msg = form.msg.trim();

        let missing: Vec<&'static str> = [("name", name), ("email", email), ("msg", msg)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        self.messages.append(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            msg: msg.to_string(),
            date: Utc::now(),
        })?;

        info!("Stored contact message");
        Ok(Notice::success(
            NoticeTarget::Contact,
            "Thank you! Your message has been sent.",
        ))
    }

    /// All stored messages, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<ContactMessage> {
        self.messages.list()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::db::keys;
    use crate::storage::MemoryStorage;

    fn form(name: &str, email: &str, msg: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            msg: msg.to_string(),
        }
    }

    #[test]
    fn test_submit_trims_and_appends() {
        let storage = MemoryStorage::new();
        let contact = ContactService::new(&storage);

        contact.submit(&form("  Anna ", "anna@example.com ", " Hello")).unwrap();
        contact.submit(&form("Ben", "ben@example.com", "Hi")).unwrap();

        let messages = contact.list();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].name, "Anna");
        assert_eq!(messages[0].email, "anna@example.com");
        assert_eq!(messages[0].msg, "Hello");
        assert_eq!(messages[1].name, "Ben");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let storage = MemoryStorage::new();
        let contact = ContactService::new(&storage);

        let err = contact.submit(&form("Anna", "   ", "")).unwrap_err();
        match err {
            ContactError::MissingFields(fields) => assert_eq!(fields, vec!["email", "msg"]),
            ContactError::Repository(e) => panic!("unexpected error: {e}"),
        }
        assert!(storage.get_item(keys::MESSAGES).unwrap().is_none());
    }

    #[test]
    fn test_date_serializes_as_rfc3339() {
        let storage = MemoryStorage::new();
        let contact = ContactService::new(&storage);
        contact.submit(&form("A", "a@b.c", "m")).unwrap();

        let raw = storage.get_item(keys::MESSAGES).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let date = json[0]["date"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
    }
}
