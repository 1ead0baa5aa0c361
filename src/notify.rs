// SPDX-License-Identifier: MPL-2.0
//! User-facing notification seam.
//!
//! The pipeline never renders toasts itself; it hands a [`Notification`] to
//! whatever [`Notifier`] the host application injected.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The action completed.
    Success,
    /// The action failed and requires user attention.
    Error,
}

/// One user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity, drives the toast styling on the presentation side.
    pub kind: NotificationKind,
    /// Short message shown to the user.
    pub message: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications, implemented by the presentation layer.
pub trait Notifier: Send + Sync {
    /// Delivers one notification to the user.
    fn notify(&self, notification: Notification);
}
