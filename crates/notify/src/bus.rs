//! In-process artefact event bus backed by a `tokio::sync::broadcast`
//! channel.
//!
//! [`ArtefactBus`] is the ingestion boundary for this engine: the
//! upstream surface publishes an [`ArtefactEvent`] and returns
//! immediately; all matching and routing happens asynchronously in the
//! [`NotificationService`](crate::service::NotificationService) loop.

use docket_core::Artefact;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ArtefactEvent
// ---------------------------------------------------------------------------

/// A lifecycle event on a publication, as emitted by the upstream
/// ingestion service.
#[derive(Debug, Clone)]
pub enum ArtefactEvent {
    /// A publication was created or republished (supersede counter > 0).
    Published(Artefact),
    /// A publication was withdrawn or deleted.
    Withdrawn(Artefact),
}

impl ArtefactEvent {
    /// The artefact the event concerns.
    pub fn artefact(&self) -> &Artefact {
        match self {
            ArtefactEvent::Published(a) | ArtefactEvent::Withdrawn(a) => a,
        }
    }
}

// ---------------------------------------------------------------------------
// ArtefactBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for artefact events.
///
/// Wraps a [`broadcast::Sender`] so the notification service (and any
/// other consumer) can independently receive every published event.
pub struct ArtefactBus {
    sender: broadcast::Sender<ArtefactEvent>,
}

impl ArtefactBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed events are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers and return at once.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: ArtefactEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ArtefactEvent> {
        self.sender.subscribe()
    }
}

impl Default for ArtefactBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
