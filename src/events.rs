use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;
use crate::traversal::Outcome;

pub use crossbeam::channel::{unbounded, Receiver, Sender};

/// Session notifications published to an optional channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    GraphGenerated(PayloadGraph),
    AlgorithmChanged(Algorithm),
    TraversalStarted(Algorithm),
    Stepped(PayloadStep),
    PlaybackStarted,
    PlaybackStopped,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadGraph {
    pub nodes: usize,
    pub edges: usize,
    pub weighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadStep {
    pub algorithm: Algorithm,
    pub outcome: Outcome,
    pub message: String,
    pub finished: bool,
}

/// Publishing end owned by the session. Sending never blocks; a dropped receiver
/// is logged once and ignored afterwards.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: Sender<Event>,
    disconnected: bool,
}

impl EventSink {
    pub fn new(sender: Sender<Event>) -> Self {
        Self {
            sender,
            disconnected: false,
        }
    }

    pub fn publish(&mut self, e: Event) {
        if self.disconnected {
            return;
        }
        if self.sender.send(e).is_err() {
            log::warn!("event receiver dropped, events are no longer published");
            self.disconnected = true;
        }
    }
}
