//! Notification sinks. Development builds surface notifications through
//! tracing output; the API additionally buffers them for the console.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use guardpost_application::{Notification, NotificationLevel, NotificationSink};
use tracing::{info, warn};

/// Sink that logs notifications to tracing output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl TracingNotificationSink {
    /// Creates a new tracing notification sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(level = ?notification.level, "{}", notification.message);
            }
            NotificationLevel::Error => {
                warn!(level = ?notification.level, "{}", notification.message);
            }
        }
    }
}

/// Notifications kept by [`BufferedNotificationSink::new`] before the oldest
/// are dropped.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

/// Sink that logs notifications and keeps the most recent ones until drained.
#[derive(Debug)]
pub struct BufferedNotificationSink {
    pending: Mutex<VecDeque<Notification>>,
    capacity: usize,
    log: TracingNotificationSink,
}

impl BufferedNotificationSink {
    /// Creates an empty buffered sink holding up to
    /// [`DEFAULT_NOTIFICATION_CAPACITY`] notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NOTIFICATION_CAPACITY)
    }

    /// Creates an empty buffered sink holding up to `capacity` notifications.
    /// A zero capacity still keeps the latest one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            log: TracingNotificationSink,
        }
    }

    /// Removes and returns buffered notifications, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

impl Default for BufferedNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for BufferedNotificationSink {
    fn notify(&self, notification: Notification) {
        self.log.notify(notification.clone());
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.len() == self.capacity {
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}
