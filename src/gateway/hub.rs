use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    domain::events::MessageEnvelope, gateway::protocol::encode_alert,
    usecases::contracts::Broadcaster,
};

const HUB_CAPACITY: usize = 256;
const HUB_ENCODE_FAILED: &str = "HUB_ENCODE_FAILED";

/// Fan-out of encoded alert frames to every connected dashboard.
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    sender: broadcast::Sender<Arc<str>>,
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<str>> {
        self.sender.subscribe()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn connected(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Broadcaster for BroadcastHub {
    fn broadcast_message(&self, envelope: MessageEnvelope) -> usize {
        let frame = match encode_alert(&envelope) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::error!(code = HUB_ENCODE_FAILED, error = %error, "alert could not be encoded");
                return 0;
            }
        };

        // Sending fails only when nobody is subscribed.
        self.sender.send(Arc::from(frame)).unwrap_or(0)
    }
}
