//! Contact form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub msg: String,
    /// Submission time, serialized as RFC 3339.
    pub date: DateTime<Utc>,
}
