//! Transient user-facing feedback.
//!
//! A [`Notice`] carries no state: it is produced by an operation, shown by
//! the front end for `timeout`, then discarded.

use std::time::Duration;

use projecta_core::NoticeLevel;

/// Default display time for a notice.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Where a notice is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeTarget {
    Cart,
    Contact,
    Login,
    Data,
}

/// A message to show once and then dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub target: NoticeTarget,
    pub level: NoticeLevel,
    pub text: String,
    pub timeout: Duration,
}

impl Notice {
    /// Build a success notice that dismisses after `timeout_ms`.
    #[must_use]
    pub fn show_msg(target: NoticeTarget, text: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            target,
            level: NoticeLevel::Success,
            text: text.into(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[must_use]
    pub fn success(target: NoticeTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            level: NoticeLevel::Success,
            text: text.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn warning(target: NoticeTarget, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            ..Self::success(target, text)
        }
    }

    #[must_use]
    pub fn error(target: NoticeTarget, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            ..Self::success(target, text)
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
