//! Per-upload event channels for conversion progress.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Buffer size for a single upload's event channel. Conversions emit a
/// handful of events at most.
const CHANNEL_BUFFER: usize = 16;

/// Events pushed to clients watching a PDF conversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ConversionEvent {
    /// Sent immediately after a client subscribes.
    Connected { storage_key: Uuid },
    /// Conversion finished and pages are available.
    ConversionComplete {
        material_id: Uuid,
        total_pages: i32,
    },
}

/// Routes conversion events to subscribed SSE clients.
///
/// Channels are keyed by the material's storage key. Subscribing twice
/// to the same key replaces the earlier subscriber, matching the
/// one-watcher-per-upload model of the admin UI.
#[derive(Debug, Default)]
pub struct ConversionNotifier {
    channels: DashMap<Uuid, mpsc::Sender<ConversionEvent>>,
}

impl ConversionNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Opens a channel for the given storage key and returns its
    /// receiving end. Any previous subscriber for the key is dropped.
    pub fn subscribe(&self, storage_key: Uuid) -> mpsc::Receiver<ConversionEvent> {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        if self.channels.insert(storage_key, tx).is_some() {
            debug!(%storage_key, "Replaced existing conversion subscriber");
        }
        rx
    }

    /// Delivers an event to the subscriber for the key, if any.
    ///
    /// Events for keys without a subscriber are dropped. The callback
    /// can arrive before or after the browser opens its event stream,
    /// and the pages land in the database either way.
    pub async fn publish(&self, storage_key: Uuid, event: ConversionEvent) {
        let Some(sender) = self.channels.get(&storage_key).map(|s| s.clone()) else {
            debug!(%storage_key, "No subscriber for conversion event, dropping");
            return;
        };

        if sender.send(event).await.is_err() {
            warn!(%storage_key, "Conversion subscriber went away, removing channel");
            self.channels.remove(&storage_key);
        }
    }

    /// Removes a key's channel once its watcher has gone away.
    ///
    /// A channel whose receiver is still alive is left alone, so a stale
    /// stream tearing down after being replaced cannot evict the watcher
    /// that replaced it.
    pub fn disconnect(&self, storage_key: Uuid) {
        self.channels
            .remove_if(&storage_key, |_, sender| sender.is_closed());
    }

    /// Number of open channels, used by tests and diagnostics.
    pub fn active_count(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let notifier = ConversionNotifier::new();
        let key = Uuid::new_v4();
        let mut rx = notifier.subscribe(key);

        let event = ConversionEvent::ConversionComplete {
            material_id: Uuid::new_v4(),
            total_pages: 12,
        };
        notifier.publish(key, event.clone()).await;

        assert_eq!(rx.recv().await, Some(event));
    }

    #[tokio::test]
    async fn publish_without_subscriber_is_dropped() {
        let notifier = ConversionNotifier::new();
        notifier
            .publish(
                Uuid::new_v4(),
                ConversionEvent::Connected {
                    storage_key: Uuid::new_v4(),
                },
            )
            .await;
        assert_eq!(notifier.active_count(), 0);
    }

    #[tokio::test]
    async fn resubscribe_replaces_previous_channel() {
        let notifier = ConversionNotifier::new();
        let key = Uuid::new_v4();

        let mut first = notifier.subscribe(key);
        let mut second = notifier.subscribe(key);

        let event = ConversionEvent::Connected { storage_key: key };
        notifier.publish(key, event.clone()).await;

        assert_eq!(second.recv().await, Some(event));
        // The first receiver's sender was dropped on replacement.
        assert_eq!(first.recv().await, None);
    }

    #[test]
    fn disconnect_removes_channel_once_receiver_is_gone() {
        let notifier = ConversionNotifier::new();
        let key = Uuid::new_v4();
        let rx = notifier.subscribe(key);
        assert_eq!(notifier.active_count(), 1);

        drop(rx);
        notifier.disconnect(key);
        assert_eq!(notifier.active_count(), 0);
    }

    #[tokio::test]
    async fn stale_disconnect_spares_a_replacement_watcher() {
        let notifier = ConversionNotifier::new();
        let key = Uuid::new_v4();

        let stale = notifier.subscribe(key);
        let mut current = notifier.subscribe(key);

        // The replaced watcher goes away and tears down its channel.
        drop(stale);
        notifier.disconnect(key);

        assert_eq!(notifier.active_count(), 1);
        let event = ConversionEvent::Connected { storage_key: key };
        notifier.publish(key, event.clone()).await;
        assert_eq!(current.recv().await, Some(event));
    }

    #[test]
    fn event_serializes_with_kebab_case_tag() {
        let event = ConversionEvent::ConversionComplete {
            material_id: Uuid::nil(),
            total_pages: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "conversion-complete");
        assert_eq!(json["total_pages"], 3);
    }
}
