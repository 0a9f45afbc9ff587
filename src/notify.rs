//! User-facing notifications (the editor's toasts).
//!
//! A [`Notifier`] is handed to whoever needs to publish; there is no global
//! channel. Subscribers each get every notification published after they
//! subscribed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Publishes notifications to every current subscriber.
///
/// Clones share the same channel and id sequence.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
    next_id: Arc<AtomicU64>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that buffers up to `capacity` unread messages per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publish a notification. Publishing with no subscribers is not an error.
    pub fn publish(&self, level: NotificationLevel, message: impl Into<String>) -> Notification {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
        };
        let delivered = self.sender.send(notification.clone()).unwrap_or(0);
        debug!(id = notification.id, level = %level, delivered, "Published notification");
        notification
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.publish(NotificationLevel::Error, message)
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.publish(NotificationLevel::Success, message)
    }

    pub fn info(&self, message: impl Into<String>) -> Notification {
        self.publish(NotificationLevel::Info, message)
    }

    pub fn subscribe(&self) -> NotificationSubscription {
        NotificationSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Subscription handle for receiving notifications.
#[derive(Debug)]
pub struct NotificationSubscription {
    receiver: broadcast::Receiver<Notification>,
}

impl NotificationSubscription {
    /// Receive the next notification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Lagged`] if messages were dropped, or
    /// [`Error::ChannelClosed`] once every notifier is gone.
    pub async fn recv(&mut self) -> Result<Notification> {
        self.receiver.recv().await.map_err(|e| match e {
            RecvError::Closed => Error::ChannelClosed,
            RecvError::Lagged(skipped) => Error::Lagged { skipped },
        })
    }

    /// Take a notification if one is waiting.
    ///
    /// # Errors
    ///
    /// Same as [`NotificationSubscription::recv`].
    pub fn try_recv(&mut self) -> Result<Option<Notification>> {
        match self.receiver.try_recv() {
            Ok(notification) => Ok(Some(notification)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(Error::ChannelClosed),
            Err(TryRecvError::Lagged(skipped)) => Err(Error::Lagged { skipped }),
        }
    }

    /// Everything currently waiting, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::iter::from_fn(|| self.try_recv().ok().flatten()).collect()
    }
}
