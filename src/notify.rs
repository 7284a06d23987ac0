//! Fire-and-forget notifications (toasts) raised by session operations.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: &str, message: &str) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn info(title: &str, message: &str) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Receiver of display requests. No response is awaited.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in memory, oldest first.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Forwards notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => {
                tracing::error!(title = %notification.title, "{}", notification.message)
            }
            _ => tracing::info!(title = %notification.title, "{}", notification.message),
        }
    }
}
