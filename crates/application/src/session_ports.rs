//! Ports used by the console session lifecycle.

use async_trait::async_trait;
use guardpost_core::AppResult;
use guardpost_domain::Identity;
use serde::Serialize;

/// Durable store key holding the opaque session token.
pub const SESSION_TOKEN_KEY: &str = "guardpost.session.token";

/// Durable store key holding the serialized signed-in user.
pub const SESSION_USER_KEY: &str = "guardpost.session.user";

/// Every key owned by the session lifecycle.
pub const SESSION_KEYS: [&str; 2] = [SESSION_TOKEN_KEY, SESSION_USER_KEY];

/// Read-only lookup of console accounts.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Finds an active identity whose email and secret match exactly.
    async fn find_by_credentials(&self, email: &str, secret: &str)
    -> AppResult<Option<Identity>>;
}

/// Durable key-value store surviving process restarts.
///
/// `set` and `clear` apply all of their entries atomically.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads one value.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Writes all entries.
    async fn set(&self, entries: &[(&str, String)]) -> AppResult<()>;

    /// Removes all keys. Missing keys are ignored.
    async fn clear(&self, keys: &[&str]) -> AppResult<()>;
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Neutral information.
    Info,
}

/// User-facing notification message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Notification severity.
    pub level: NotificationLevel,
    /// Message shown to the user.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Creates an informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for user-facing notifications.
pub trait NotificationSink: Send + Sync {
    /// Publishes a notification. Delivery is not acknowledged.
    fn notify(&self, notification: Notification);
}
