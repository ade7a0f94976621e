use serde::Serialize;
use tokio::sync::broadcast;

/// Notification published by [`crate::dom::Document`] after each childList
/// mutation. Carries no payload; subscribers rescan the whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum DomEvent {
    SubtreeChanged,
}

#[derive(Clone)]
pub struct Bus {
    sender: broadcast::Sender<DomEvent>,
}

impl Bus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomEvent> {
        self.sender.subscribe()
    }

    /// Publish a notification. A send error only means nobody is listening,
    /// which is fine for a mutation stream.
    pub fn publish(&self, event: DomEvent) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn publish_and_receive_event() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(DomEvent::SubtreeChanged);

        let received = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        assert_eq!(received, DomEvent::SubtreeChanged);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = Bus::new(8);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(DomEvent::SubtreeChanged);

        assert_eq!(rx1.recv().await.expect("recv1"), DomEvent::SubtreeChanged);
        assert_eq!(rx2.recv().await.expect("recv2"), DomEvent::SubtreeChanged);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = Bus::new(8);
        bus.publish(DomEvent::SubtreeChanged);
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let json = serde_json::to_value(DomEvent::SubtreeChanged).expect("serialize");
        assert_eq!(json["type"], "SubtreeChanged");
    }
}
