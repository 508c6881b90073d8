use crate::command::{HighlightStyle, MapCommand};
use crate::state::MapState;
use log::trace;
use tokio::sync::broadcast;

/// Events emitted during command execution.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// The map state snapshot after a mutation. `highlight_style` is the
    /// style given on the highlight command that caused this change, so
    /// subscribers can mirror the adapter's rendering; `None` for every
    /// other mutation.
    StateChanged {
        state: MapState,
        highlight_style: Option<HighlightStyle>,
    },
    /// A command finished (its adapter call settled and state is final).
    CommandExecuted { command: MapCommand },
    /// An adapter call rejected; the command itself still resolved.
    Error { message: String },
}

/// Broadcast fan-out for bridge events. Emitting with no subscribers is
/// fine; a lagging subscriber drops the oldest events, never blocks the
/// bridge.
pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn emit(&self, event: BridgeEvent) {
        trace!(target: "warroom_map_bridge", "emitting {:?}", event);
        let _ = self.sender.send(event);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
