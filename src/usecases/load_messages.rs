use futures_util::future::join_all;

use crate::{
    domain::{events::HistoryEntry, message::InboundMessage, text::resolve_text},
    usecases::{
        contracts::{AutomationClient, AutomationError},
        extract_media::extract_media,
    },
};

pub const HISTORY_LIMIT: usize = 20;

/// Recent history of one chat with text and media resolved per message.
pub async fn load_messages(
    client: &dyn AutomationClient,
    chat_id: &str,
) -> Result<Vec<HistoryEntry>, AutomationError> {
    let chat = client.get_chat_by_id(chat_id).await?;
    let messages = client
        .fetch_messages(&chat.id.serialized, HISTORY_LIMIT)
        .await?;

    let entries = messages
        .into_iter()
        .map(|message| history_entry(client, message));

    Ok(join_all(entries).await)
}

async fn history_entry(client: &dyn AutomationClient, message: InboundMessage) -> HistoryEntry {
    let body = resolve_text(&message);
    let media = extract_media(client, &message).await.into_payload();

    HistoryEntry {
        from_me: message.from_me,
        body,
        media,
        message_type: message.message_type.as_str().to_owned(),
        ack: message.ack,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            media::DownloadedMedia,
            message::{MessageType, RawMessageData},
        },
        test_support::{chat, StubAutomation},
    };

    fn history() -> Vec<InboundMessage> {
        vec![
            InboundMessage {
                id: "a".to_owned(),
                body: "hello".to_owned(),
                from_me: true,
                ack: 3,
                ..InboundMessage::default()
            },
            InboundMessage {
                id: "b".to_owned(),
                message_type: MessageType::Image,
                has_media: true,
                ack: 1,
                raw: Some(RawMessageData {
                    caption: Some("look".to_owned()),
                    ..RawMessageData::default()
                }),
                ..InboundMessage::default()
            },
        ]
    }

    #[tokio::test]
    async fn fetches_twenty_messages_of_the_requested_chat() {
        let client = StubAutomation {
            chats: Ok(vec![chat("42@c.us", Some("Ann"), false)]),
            ..StubAutomation::default()
        };

        load_messages(&client, "42@c.us")
            .await
            .expect("history should load");

        assert_eq!(
            client.calls(),
            vec![
                "get_chat_by_id:42@c.us".to_owned(),
                "fetch_messages:42@c.us:20".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn resolves_text_and_media_per_message() {
        let client = StubAutomation {
            chats: Ok(vec![chat("42@c.us", Some("Ann"), false)]),
            messages: Ok(history()),
            media: Ok(Some(DownloadedMedia {
                mimetype: "image/jpeg".to_owned(),
                data: "/9j/".to_owned(),
            })),
            ..StubAutomation::default()
        };

        let entries = load_messages(&client, "42@c.us")
            .await
            .expect("history should load");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].body, "hello");
        assert!(entries[0].from_me);
        assert_eq!(entries[0].message_type, "chat");
        assert_eq!(entries[0].media, None);
        assert_eq!(entries[0].ack, 3);
        assert_eq!(entries[1].body, "look");
        assert_eq!(entries[1].message_type, "image");
        assert!(entries[1].media.is_some());
    }

    #[tokio::test]
    async fn unknown_chat_is_an_error() {
        let client = StubAutomation::default();

        let result = load_messages(&client, "missing@c.us").await;

        assert_eq!(
            result,
            Err(AutomationError::ChatNotFound("missing@c.us".to_owned()))
        );
    }
}
