//! Real-time user notifications (toast-style push).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use salesguard_core::UserId;
use salesguard_events::EventBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Danger,
}

/// A notification pushed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Sticky notifications stay on screen until dismissed.
    pub sticky: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification transport failed: {0}")]
    Transport(String),
}

/// Real-time push primitive of the host platform.
pub trait NotificationSink: Send + Sync {
    fn push(&self, notification: Notification) -> Result<(), NotifyError>;
}

impl<S> NotificationSink for std::sync::Arc<S>
where
    S: NotificationSink + ?Sized,
{
    fn push(&self, notification: Notification) -> Result<(), NotifyError> {
        (**self).push(notification)
    }
}

/// Notification sink backed by a pub/sub bus. Clients subscribe to the bus
/// and filter on `recipient`.
#[derive(Debug)]
pub struct BusNotificationSink<B> {
    bus: B,
}

impl<B> BusNotificationSink<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<B> NotificationSink for BusNotificationSink<B>
where
    B: EventBus<Notification>,
{
    fn push(&self, notification: Notification) -> Result<(), NotifyError> {
        self.bus
            .publish(notification)
            .map_err(|e| NotifyError::Transport(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesguard_events::InMemoryEventBus;
    use std::sync::Arc;

    #[test]
    fn pushed_notification_reaches_bus_subscribers() {
        let bus = Arc::new(InMemoryEventBus::new());
        let subscription = bus.subscribe();
        let sink = BusNotificationSink::new(bus.clone());

        let recipient = UserId::new();
        sink.push(Notification {
            recipient,
            kind: NotificationKind::Warning,
            title: "t".to_string(),
            message: "m".to_string(),
            sticky: false,
        })
        .unwrap();

        let received = subscription.drain();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].recipient, recipient);
        assert_eq!(received[0].kind, NotificationKind::Warning);
    }
}
