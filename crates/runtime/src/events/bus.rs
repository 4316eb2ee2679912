//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::broadcast;

use super::types::{RandomEventUpdate, SaveEvent, SocialEvent, WeekEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Week staging and commits
    Week,
    /// Random events triggered or resolved
    RandomEvent,
    /// Social-media posts
    Social,
    /// Auto-save results
    Save,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Week, Topic::RandomEvent, Topic::Social, Topic::Save];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    Week(WeekEvent),
    RandomEvent(RandomEventUpdate),
    Social(SocialEvent),
    Save(SaveEvent),
}

impl SessionEvent {
    pub fn topic(&self) -> Topic {
        match self {
            SessionEvent::Week(_) => Topic::Week,
            SessionEvent::RandomEvent(_) => Topic::RandomEvent,
            SessionEvent::Social(_) => Topic::Social,
            SessionEvent::Save(_) => Topic::Save,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic has its own broadcast channel, so a
/// slow week subscriber never lags the save stream.
#[derive(Clone)]
pub struct EventBus {
    week: broadcast::Sender<SessionEvent>,
    random_event: broadcast::Sender<SessionEvent>,
    social: broadcast::Sender<SessionEvent>,
    save: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            week: broadcast::channel(capacity).0,
            random_event: broadcast::channel(capacity).0,
            social: broadcast::channel(capacity).0,
            save: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<SessionEvent> {
        match topic {
            Topic::Week => &self.week,
            Topic::RandomEvent => &self.random_event,
            Topic::Social => &self.social,
            Topic::Save => &self.save,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: SessionEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<SessionEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<SessionEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapsim_core::{Week, WeeklySummary};

    fn staged() -> SessionEvent {
        SessionEvent::Week(WeekEvent::Staged {
            summary: WeeklySummary {
                week: Week::FIRST,
                ..WeeklySummary::default()
            },
        })
    }

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut week_rx = bus.subscribe(Topic::Week);
        let mut save_rx = bus.subscribe(Topic::Save);

        bus.publish(staged());
        bus.publish(SessionEvent::Save(SaveEvent::Failed {
            reason: "offline".into(),
        }));

        assert!(matches!(week_rx.recv().await, Ok(SessionEvent::Week(_))));
        assert!(matches!(save_rx.recv().await, Ok(SessionEvent::Save(_))));
        assert!(week_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(staged());

        let receivers = bus.subscribe_multiple(&Topic::ALL);
        assert_eq!(receivers.len(), 4);
    }
}
