use tokio::sync::mpsc;
use tracing::warn;

use crate::models::ProductId;

/// Notifications emitted by the view-models so the shell can react to
/// lifecycle changes without the models referencing each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The list asked for a product to be staged in the form
    EditRequested(ProductId),

    /// The form persisted a product; listeners should refresh
    Saved(ProductId),

    /// The form was dismissed without saving
    Cancelled,
}

/// Cloneable handle for publishing events to the shell's channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Publishes an event. A missing receiver is logged and the event
    /// dropped; state changes never depend on delivery.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("Event receiver dropped, discarding {:?}", e.0);
        }
    }
}

/// Creates a bounded event channel wrapped in an [`EventSender`].
pub fn event_channel(capacity: usize) -> (EventSender, mpsc::Receiver<Event>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}
