use super::{media::MediaPayload, message::InboundMessage};

/// Events pushed by the automation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationEvent {
    /// A pairing code is waiting to be scanned.
    QrRequired,
    /// The session is usable.
    Ready,
    Message(Box<InboundMessage>),
}

/// Broadcast to every dashboard on each inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEnvelope {
    pub chat_id: String,
    pub chat_name: String,
    pub body: String,
    pub media: Option<MediaPayload>,
    /// Seconds since epoch.
    pub timestamp: f64,
    pub unread: bool,
}

/// One entry of a `message_history` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub from_me: bool,
    pub body: String,
    pub media: Option<MediaPayload>,
    pub message_type: String,
    pub ack: i32,
}

pub fn now_unix_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
