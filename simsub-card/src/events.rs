//! Typed events towards the rest of the mobile-station stack
//!
//! Collaborators (mobility management, GPRS attach logic) never touch the
//! subscriber record directly; they react to these events. The channel a
//! manager publishes on identifies the station.

use std::fmt;
use tokio::sync::mpsc;

/// Events published by the subscriber manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberEvent {
    /// A card finished attaching; the record is ready to be read
    Attached,
    /// The card went away or failed terminally
    Detached,
    /// Result of an authentication request
    AuthResponse { sres: [u8; 4] },
}

impl fmt::Display for SubscriberEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriberEvent::Attached => write!(f, "SIM attached"),
            SubscriberEvent::Detached => write!(f, "SIM detached"),
            SubscriberEvent::AuthResponse { sres } => {
                write!(
                    f,
                    "SIM auth response {:02x}{:02x}{:02x}{:02x}",
                    sres[0], sres[1], sres[2], sres[3]
                )
            }
        }
    }
}

/// Publishing half of the event bus
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<SubscriberEvent>,
}

impl EventSender {
    /// Deliver an event; a gone collaborator is not an error
    pub fn publish(&self, event: SubscriberEvent) {
        log::debug!("publishing event: {}", event);
        if self.tx.send(event).is_err() {
            log::warn!("event collaborator is gone, event dropped");
        }
    }
}

/// Create the event bus for one station
pub fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<SubscriberEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

/// User notification sink (PIN prompts, terminal card failures)
///
/// A `None` text means "clear any pending prompt for this station".
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Option<String>>,
}

impl Notifier {
    /// Clear any stale prompt
    pub fn clear(&self) {
        let _ = self.tx.send(None);
    }

    /// Surface a formatted text to the user
    pub fn notify(&self, text: impl Into<String>) {
        let _ = self.tx.send(Some(text.into()));
    }
}

/// Create the notification sink for one station
pub fn notify_channel() -> (Notifier, mpsc::UnboundedReceiver<Option<String>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let (events, mut rx) = event_channel();
        events.publish(SubscriberEvent::Attached);
        assert_eq!(rx.recv().await.unwrap(), SubscriberEvent::Attached);
    }

    #[tokio::test]
    async fn test_publish_to_gone_collaborator() {
        let (events, rx) = event_channel();
        drop(rx);
        // must not panic
        events.publish(SubscriberEvent::Detached);
    }

    #[tokio::test]
    async fn test_notify_clear() {
        let (notifier, mut rx) = notify_channel();
        notifier.clear();
        notifier.notify("Please give PIN");
        assert_eq!(rx.recv().await.unwrap(), None);
        assert_eq!(rx.recv().await.unwrap(), Some("Please give PIN".to_string()));
    }
}
