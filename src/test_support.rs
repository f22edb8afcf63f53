use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{
    domain::{
        chat::{ChatId, ChatRecord},
        events::MessageEnvelope,
        media::{DownloadedMedia, OutgoingMedia},
        message::InboundMessage,
    },
    usecases::contracts::{AutomationClient, AutomationError, Broadcaster},
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().expect("env lock should not be poisoned")
}

/// Automation client with canned results that records every call.
pub struct StubAutomation {
    pub chats: Result<Vec<ChatRecord>, AutomationError>,
    pub messages: Result<Vec<InboundMessage>, AutomationError>,
    pub profile_pic: Result<Option<String>, AutomationError>,
    pub media: Result<Option<DownloadedMedia>, AutomationError>,
    pub send: Result<(), AutomationError>,
    pub pairing: Result<String, AutomationError>,
    pub calls: Mutex<Vec<String>>,
    pub sent_media: Mutex<Vec<(String, OutgoingMedia)>>,
}

impl Default for StubAutomation {
    fn default() -> Self {
        Self {
            chats: Ok(Vec::new()),
            messages: Ok(Vec::new()),
            profile_pic: Ok(None),
            media: Ok(None),
            send: Ok(()),
            pairing: Ok("pairing-code".to_owned()),
            calls: Mutex::new(Vec::new()),
            sent_media: Mutex::new(Vec::new()),
        }
    }
}

impl StubAutomation {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn sent_media(&self) -> Vec<(String, OutgoingMedia)> {
        self.sent_media.lock().expect("sent media lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl AutomationClient for StubAutomation {
    async fn get_chats(&self) -> Result<Vec<ChatRecord>, AutomationError> {
        self.record("get_chats".to_owned());
        self.chats.clone()
    }

    async fn get_chat_by_id(&self, chat_id: &str) -> Result<ChatRecord, AutomationError> {
        self.record(format!("get_chat_by_id:{chat_id}"));
        self.chats
            .clone()?
            .into_iter()
            .find(|chat| chat.id.serialized == chat_id)
            .ok_or_else(|| AutomationError::ChatNotFound(chat_id.to_owned()))
    }

    async fn fetch_messages(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<InboundMessage>, AutomationError> {
        self.record(format!("fetch_messages:{chat_id}:{limit}"));
        self.messages.clone()
    }

    async fn profile_pic_url(&self, contact_id: &str) -> Result<Option<String>, AutomationError> {
        self.record(format!("profile_pic_url:{contact_id}"));
        self.profile_pic.clone()
    }

    async fn download_media(
        &self,
        message: &InboundMessage,
    ) -> Result<Option<DownloadedMedia>, AutomationError> {
        self.record(format!("download_media:{}", message.id));
        self.media.clone()
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), AutomationError> {
        self.record(format!("send_text:{chat_id}:{text}"));
        self.send.clone()
    }

    async fn send_media(&self, chat_id: &str, media: OutgoingMedia) -> Result<(), AutomationError> {
        self.record(format!("send_media:{chat_id}"));
        self.sent_media
            .lock()
            .expect("sent media lock")
            .push((chat_id.to_owned(), media));
        self.send.clone()
    }

    async fn send_seen(&self, chat_id: &str) -> Result<(), AutomationError> {
        self.record(format!("send_seen:{chat_id}"));
        self.send.clone()
    }

    async fn pairing_code(&self) -> Result<String, AutomationError> {
        self.record("pairing_code".to_owned());
        self.pairing.clone()
    }
}

/// Broadcaster that keeps every envelope and reports a fixed audience.
pub struct RecordingBroadcaster {
    pub receivers: usize,
    envelopes: Mutex<Vec<MessageEnvelope>>,
}

impl RecordingBroadcaster {
    pub fn with_receivers(receivers: usize) -> Self {
        Self {
            receivers,
            envelopes: Mutex::new(Vec::new()),
        }
    }

    pub fn envelopes(&self) -> Vec<MessageEnvelope> {
        self.envelopes.lock().expect("envelopes lock").clone()
    }
}

impl Broadcaster for RecordingBroadcaster {
    fn broadcast_message(&self, envelope: MessageEnvelope) -> usize {
        self.envelopes.lock().expect("envelopes lock").push(envelope);
        self.receivers
    }
}

pub fn chat(serialized: &str, name: Option<&str>, is_group: bool) -> ChatRecord {
    ChatRecord {
        id: ChatId::parse(serialized),
        name: name.map(ToOwned::to_owned),
        is_group,
        ..ChatRecord::default()
    }
}
