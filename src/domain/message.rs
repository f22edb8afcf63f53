/// Type tag of a WhatsApp message as reported by the automation client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MessageType {
    /// Plain text (`chat`).
    #[default]
    Chat,
    Image,
    Video,
    /// Push-to-talk voice note.
    Ptt,
    Audio,
    Sticker,
    Interactive,
    List,
    /// Any tag this bridge has no special handling for.
    Other(String),
}

impl MessageType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "chat" => Self::Chat,
            "image" => Self::Image,
            "video" => Self::Video,
            "ptt" => Self::Ptt,
            "audio" => Self::Audio,
            "sticker" => Self::Sticker,
            "interactive" => Self::Interactive,
            "list" => Self::List,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Chat => "chat",
            Self::Image => "image",
            Self::Video => "video",
            Self::Ptt => "ptt",
            Self::Audio => "audio",
            Self::Sticker => "sticker",
            Self::Interactive => "interactive",
            Self::List => "list",
            Self::Other(tag) => tag,
        }
    }

    /// Types whose attachment is downloaded and forwarded to dashboards.
    pub fn carries_forwarded_media(&self) -> bool {
        matches!(self, Self::Image | Self::Ptt | Self::Audio)
    }
}

/// Fallback fields nested inside the raw message data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawMessageData {
    pub body: Option<String>,
    pub caption: Option<String>,
    pub title: Option<String>,
    pub notify_name: Option<String>,
}

/// Where the automation client keeps the attachment bytes of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLocator {
    pub url: String,
    pub mimetype: Option<String>,
}

/// Message record as owned by the automation client. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboundMessage {
    pub id: String,
    pub from: String,
    pub body: String,
    pub message_type: MessageType,
    pub from_me: bool,
    pub has_media: bool,
    pub ack: i32,
    pub timestamp: Option<i64>,
    pub raw: Option<RawMessageData>,
    pub media: Option<MediaLocator>,
}

impl InboundMessage {
    /// Display name of the sender: push name, else the user part of the
    /// sender id, else `Unknown`.
    pub fn sender_display_name(&self) -> String {
        if let Some(name) = self
            .raw
            .as_ref()
            .and_then(|raw| raw.notify_name.as_deref())
            .filter(|name| !name.trim().is_empty())
        {
            return name.to_owned();
        }

        match self.from.split('@').next() {
            Some(user) if !user.is_empty() => user.to_owned(),
            _ => "Unknown".to_owned(),
        }
    }
}
