//! Dashboard wire format: JSON text frames `{"event": name, "data": payload}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        chat::{ChatSummary, ContactSummary},
        events::{HistoryEntry, MessageEnvelope},
        media::MediaPayload,
    },
    usecases::{
        command_proxy::{ClientCommand, Reply},
        send_media::SendMediaCommand,
        send_message::SendMessageCommand,
    },
};

pub const NEW_MESSAGE_ALERT: &str = "new_message_alert";
pub const CHAT_LIST: &str = "chat_list";
pub const ALL_CONTACTS_DATA: &str = "all_contacts_data";
pub const MESSAGE_HISTORY: &str = "message_history";

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("frame is not valid JSON: {0}")]
    MalformedFrame(#[source] serde_json::Error),
    #[error("payload of {event} is invalid: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown event {0}")]
    UnknownEvent(String),
}

#[derive(Debug, Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct OutboundFrame<'a, T> {
    event: &'a str,
    data: T,
}

/// Chat id sent either bare or wrapped as `{ "chatId": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatIdPayload {
    Bare(String),
    Wrapped {
        #[serde(rename = "chatId")]
        chat_id: String,
    },
}

impl ChatIdPayload {
    fn into_chat_id(self) -> String {
        match self {
            Self::Bare(chat_id) | Self::Wrapped { chat_id } => chat_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessagePayload {
    chat_id: String,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendImagePayload {
    chat_id: String,
    image_params: String,
    #[serde(default)]
    is_audio: bool,
    #[serde(default)]
    caption: Option<String>,
}

#[derive(Debug, Serialize)]
struct MediaDto<'a> {
    #[serde(rename = "type")]
    media_type: &'a str,
    data: &'a str,
    mimetype: &'a str,
}

impl<'a> From<&'a MediaPayload> for MediaDto<'a> {
    fn from(media: &'a MediaPayload) -> Self {
        Self {
            media_type: &media.media_type,
            data: &media.data,
            mimetype: &media.mimetype,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeDto<'a> {
    chat_id: &'a str,
    chat_name: &'a str,
    body: &'a str,
    media: Option<MediaDto<'a>>,
    timestamp: f64,
    unread: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatDto<'a> {
    name: &'a str,
    id: &'a str,
    last_message: &'a str,
    timestamp: f64,
    pic: &'a str,
    unread_count: i32,
}

#[derive(Debug, Serialize)]
struct ContactDto<'a> {
    id: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryDto<'a> {
    from_me: bool,
    body: &'a str,
    media: Option<MediaDto<'a>>,
    #[serde(rename = "type")]
    message_type: &'a str,
    ack: i32,
}

/// Parses one dashboard frame into a command.
pub fn decode_command(text: &str) -> Result<ClientCommand, ProtocolError> {
    let frame: InboundFrame = serde_json::from_str(text).map_err(ProtocolError::MalformedFrame)?;
    let event = frame.event;

    let command = match event.as_str() {
        "get_chats" => ClientCommand::ListChats,
        "get_all_contacts" => ClientCommand::ListContacts,
        "get_messages" => ClientCommand::GetMessages {
            chat_id: payload::<ChatIdPayload>(&event, frame.data)?.into_chat_id(),
        },
        "send_message" => {
            let payload: SendMessagePayload = payload(&event, frame.data)?;
            ClientCommand::SendMessage(SendMessageCommand {
                chat_id: payload.chat_id,
                text: payload.message,
            })
        }
        "send_image" => {
            let payload: SendImagePayload = payload(&event, frame.data)?;
            ClientCommand::SendMedia(SendMediaCommand {
                chat_id: payload.chat_id,
                data: payload.image_params,
                is_audio: payload.is_audio,
                caption: payload.caption,
            })
        }
        "mark_read" => ClientCommand::MarkRead {
            chat_id: payload::<ChatIdPayload>(&event, frame.data)?.into_chat_id(),
        },
        _ => return Err(ProtocolError::UnknownEvent(event)),
    };

    Ok(command)
}

fn payload<T: serde::de::DeserializeOwned>(
    event: &str,
    data: serde_json::Value,
) -> Result<T, ProtocolError> {
    serde_json::from_value(data).map_err(|source| ProtocolError::InvalidPayload {
        event: event.to_owned(),
        source,
    })
}

/// Encodes a proxy reply, or `None` when nothing goes back.
pub fn encode_reply(reply: &Reply) -> Option<Result<String, serde_json::Error>> {
    let encoded = match reply {
        Reply::ChatList(chats) => encode(CHAT_LIST, chats.iter().map(chat_dto).collect::<Vec<_>>()),
        Reply::Contacts(contacts) => encode(
            ALL_CONTACTS_DATA,
            contacts.iter().map(contact_dto).collect::<Vec<_>>(),
        ),
        Reply::History(entries) => encode(
            MESSAGE_HISTORY,
            entries.iter().map(history_dto).collect::<Vec<_>>(),
        ),
        Reply::Silent => return None,
    };

    Some(encoded)
}

pub fn encode_alert(envelope: &MessageEnvelope) -> Result<String, serde_json::Error> {
    encode(
        NEW_MESSAGE_ALERT,
        EnvelopeDto {
            chat_id: &envelope.chat_id,
            chat_name: &envelope.chat_name,
            body: &envelope.body,
            media: envelope.media.as_ref().map(MediaDto::from),
            timestamp: envelope.timestamp,
            unread: envelope.unread,
        },
    )
}

fn encode<T: Serialize>(event: &str, data: T) -> Result<String, serde_json::Error> {
    serde_json::to_string(&OutboundFrame { event, data })
}

fn chat_dto(chat: &ChatSummary) -> ChatDto<'_> {
    ChatDto {
        name: &chat.name,
        id: &chat.id,
        last_message: &chat.last_message,
        timestamp: chat.timestamp,
        pic: &chat.pic,
        unread_count: chat.unread_count,
    }
}

fn contact_dto(contact: &ContactSummary) -> ContactDto<'_> {
    ContactDto {
        id: &contact.id,
        name: &contact.name,
    }
}

fn history_dto(entry: &HistoryEntry) -> HistoryDto<'_> {
    HistoryDto {
        from_me: entry.from_me,
        body: &entry.body,
        media: entry.media.as_ref().map(MediaDto::from),
        message_type: &entry.message_type,
        ack: entry.ack,
    }
}
