//! JSON shapes of the WhatsApp HTTP API (whatsapp-web.js engine).
//!
//! Every field is optional or defaulted: payloads differ between engine
//! versions and a missing field must never fail a whole listing.

use serde::Deserialize;

use crate::domain::{
    chat::{ChatId, ChatRecord},
    message::{InboundMessage, MediaLocator, MessageType, RawMessageData},
};

/// Ids arrive either as `"user@server"` or as `{ user, server, _serialized }`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireId {
    Serialized(String),
    Structured {
        #[serde(default)]
        user: Option<String>,
        #[serde(rename = "_serialized")]
        serialized: String,
    },
}

impl WireId {
    fn into_chat_id(self) -> ChatId {
        match self {
            Self::Serialized(serialized) => ChatId::parse(&serialized),
            Self::Structured { user, serialized } => match user {
                Some(user) => ChatId { user, serialized },
                None => ChatId::parse(&serialized),
            },
        }
    }

    fn into_serialized(self) -> String {
        match self {
            Self::Serialized(serialized) | Self::Structured { serialized, .. } => serialized,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireChat {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub is_group: Option<bool>,
    pub unread_count: Option<i32>,
    pub timestamp: Option<i64>,
    pub last_message: Option<WireMessage>,
}

impl From<WireChat> for ChatRecord {
    fn from(chat: WireChat) -> Self {
        let id = chat.id.map(WireId::into_chat_id).unwrap_or_default();
        let is_group = chat
            .is_group
            .unwrap_or_else(|| id.serialized.ends_with("@g.us"));

        Self {
            id,
            name: chat.name,
            is_group,
            unread_count: chat.unread_count.unwrap_or_default(),
            timestamp: chat.timestamp.filter(|ts| *ts > 0),
            last_message: chat.last_message.map(InboundMessage::from),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireMessage {
    pub id: Option<WireId>,
    pub from: Option<String>,
    pub body: Option<String>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    pub from_me: Option<bool>,
    pub has_media: Option<bool>,
    pub ack: Option<i32>,
    pub timestamp: Option<i64>,
    #[serde(rename = "_data")]
    pub data: Option<WireRawData>,
    pub media: Option<WireMedia>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireRawData {
    pub body: Option<String>,
    pub caption: Option<String>,
    pub title: Option<String>,
    pub notify_name: Option<String>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireMedia {
    pub url: Option<String>,
    pub mimetype: Option<String>,
}

impl From<WireMessage> for InboundMessage {
    fn from(message: WireMessage) -> Self {
        let type_tag = message
            .message_type
            .clone()
            .or_else(|| message.data.as_ref().and_then(|raw| raw.message_type.clone()))
            .unwrap_or_else(|| "chat".to_owned());

        let media = message.media.and_then(|media| {
            media.url.filter(|url| !url.is_empty()).map(|url| MediaLocator {
                url,
                mimetype: media.mimetype,
            })
        });

        Self {
            id: message
                .id
                .map(WireId::into_serialized)
                .unwrap_or_default(),
            from: message.from.unwrap_or_default(),
            body: message.body.unwrap_or_default(),
            message_type: MessageType::from_tag(&type_tag),
            from_me: message.from_me.unwrap_or_default(),
            has_media: message.has_media.unwrap_or_default(),
            ack: message.ack.unwrap_or_default(),
            timestamp: message.timestamp,
            raw: message.data.map(|raw| RawMessageData {
                body: raw.body,
                caption: raw.caption,
                title: raw.title,
                notify_name: raw.notify_name,
            }),
            media,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireProfilePicture {
    #[serde(rename = "profilePictureURL")]
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireQrCode {
    pub value: Option<String>,
}
