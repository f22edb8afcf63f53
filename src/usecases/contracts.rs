use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    chat::ChatRecord,
    events::MessageEnvelope,
    media::{DownloadedMedia, OutgoingMedia},
    message::InboundMessage,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomationError {
    #[error("automation client unreachable: {0}")]
    Unavailable(String),
    #[error("automation client rejected the call with status {status}: {details}")]
    Rejected { status: u16, details: String },
    #[error("automation client returned unexpected data: {0}")]
    InvalidData(String),
    #[error("chat {0} was not found")]
    ChatNotFound(String),
}

/// Live WhatsApp session owned by an external automation service.
#[async_trait]
pub trait AutomationClient: Send + Sync {
    async fn get_chats(&self) -> Result<Vec<ChatRecord>, AutomationError>;

    async fn get_chat_by_id(&self, chat_id: &str) -> Result<ChatRecord, AutomationError>;

    /// Most recent messages of a chat, oldest first.
    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<InboundMessage>, AutomationError>;

    async fn profile_pic_url(&self, contact_id: &str) -> Result<Option<String>, AutomationError>;

    async fn download_media(
        &self,
        message: &InboundMessage,
    ) -> Result<Option<DownloadedMedia>, AutomationError>;

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), AutomationError>;

    async fn send_media(&self, chat_id: &str, media: OutgoingMedia) -> Result<(), AutomationError>;

    async fn send_seen(&self, chat_id: &str) -> Result<(), AutomationError>;

    /// Raw pairing string to render as a QR code.
    async fn pairing_code(&self) -> Result<String, AutomationError>;
}

/// Fan-out to every connected dashboard.
pub trait Broadcaster: Send + Sync {
    /// Returns how many dashboards the envelope was handed to.
    fn broadcast_message(&self, envelope: MessageEnvelope) -> usize;
}
