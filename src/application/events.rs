// src/application/events.rs
use crate::constants::EVENT_CHANNEL_CAPACITY;
use tokio::sync::broadcast;
use tracing::debug;

/// Signals exchanged between elements. Carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    Added,
}

/// Multi-subscriber "note added" channel owned by the hosting app.
///
/// Elements that emit get a clone of this handle, elements that listen call
/// [`NoteEvents::subscribe`]. Dispatch enqueues the signal for every receiver that
/// exists at that moment; receivers created later do not see it.
#[derive(Debug, Clone)]
pub struct NoteEvents {
    sender: broadcast::Sender<NoteEvent>,
}

impl NoteEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.sender.subscribe()
    }

    /// Broadcast [`NoteEvent::Added`], returning how many subscribers received it
    pub fn notify_added(&self) -> usize {
        match self.sender.send(NoteEvent::Added) {
            Ok(receivers) => {
                debug!(receivers, "Dispatched note-added");
                receivers
            }
            Err(_) => {
                debug!("Dispatched note-added without subscribers");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NoteEvents {
    fn default() -> Self {
        Self::new()
    }
}
