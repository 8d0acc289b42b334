//! Live-update broadcast registry.
//!
//! An explicit registry owned by the server process: `/events` subscribers attach on
//! connect and drop on disconnect, and the reservation service publishes committed
//! participants. Delivery is best-effort; a slow or lagging subscriber only loses
//! its own messages and never affects other subscribers or the publisher.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::model::api::ParticipantDto;

/// Per-subscriber buffer; lagging subscribers drop their oldest messages.
const CHANNEL_CAPACITY: usize = 64;

/// Envelope pushed to event-stream subscribers after each committed reservation.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantCreatedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub participant: ParticipantDto,
}

/// Broadcast handle shared through application state.
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<ParticipantCreatedEvent>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Registers a new subscriber; dropping the receiver removes it.
    pub fn subscribe(&self) -> broadcast::Receiver<ParticipantCreatedEvent> {
        self.tx.subscribe()
    }

    /// Publishes a committed participant to every subscriber.
    pub fn publish(&self, participant: ParticipantDto) {
        let event = ParticipantCreatedEvent {
            event_type: "participant_created".to_string(),
            participant,
        };

        // Send only errors when nobody is listening.
        let _ = self.tx.send(event);
    }
}
