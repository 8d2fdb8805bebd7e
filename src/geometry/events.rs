use crossbeam_channel::{unbounded, Receiver, Sender};

/// Events emitted by geometries toward the hosting container.
///
/// Delivery is synchronous and in-process: the sends happen before the
/// triggering mutator returns, and hosts drain their receivers afterwards.
/// `PositionChanged` and `Clicked` carry the emitting geometry's id so
/// listeners can re-index spatial structures or dispatch selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometryEvent {
    /// A visually observable attribute changed; the hosting container
    /// should schedule a repaint.
    RedrawRequested,
    /// The anchor coordinate changed.
    PositionChanged { id: String },
    /// A hit test landed on this geometry.
    Clicked { id: String },
}

/// Fan-out of geometry events to any number of subscribers.
///
/// Channels are unbounded so emission never blocks; subscribers that dropped
/// their receiver are skipped.
#[derive(Debug, Default)]
pub struct EventSink {
    senders: Vec<Sender<GeometryEvent>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> Receiver<GeometryEvent> {
        let (tx, rx) = unbounded();
        self.senders.push(tx);
        rx
    }

    /// Sends `event` to every live subscriber, in registration order.
    pub fn emit(&self, event: &GeometryEvent) {
        for sender in &self.senders {
            // A failed send means the receiver was dropped; nothing to do.
            let _ = sender.send(event.clone());
        }
    }

    /// Number of registered subscribers (including disconnected ones).
    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
