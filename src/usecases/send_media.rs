use crate::{
    domain::media::OutgoingMedia,
    usecases::contracts::{AutomationClient, AutomationError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMediaCommand {
    pub chat_id: String,
    /// Base64 encoded file.
    pub data: String,
    pub is_audio: bool,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMediaError {
    EmptyPayload,
    Upstream(AutomationError),
}

/// Sends a voice note when `is_audio` is set, a captioned photo otherwise.
pub async fn send_media(
    client: &dyn AutomationClient,
    command: SendMediaCommand,
) -> Result<(), SendMediaError> {
    if command.data.trim().is_empty() {
        return Err(SendMediaError::EmptyPayload);
    }

    let media = OutgoingMedia::package(command.data, command.is_audio, command.caption);

    client
        .send_media(&command.chat_id, media)
        .await
        .map_err(SendMediaError::Upstream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::media::{IMAGE_MIMETYPE, VOICE_MIMETYPE},
        test_support::StubAutomation,
    };

    fn command(is_audio: bool, caption: Option<&str>) -> SendMediaCommand {
        SendMediaCommand {
            chat_id: "7@c.us".to_owned(),
            data: "UklGRg==".to_owned(),
            is_audio,
            caption: caption.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn audio_flag_sends_voice_note_not_image() {
        let client = StubAutomation::default();

        send_media(&client, command(true, Some("ignored")))
            .await
            .expect("send should succeed");

        let sent = client.sent_media();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "7@c.us");
        match &sent[0].1 {
            OutgoingMedia::VoiceNote { mimetype, data, .. } => {
                assert_eq!(mimetype, VOICE_MIMETYPE);
                assert_eq!(data, "UklGRg==");
            }
            other => panic!("expected voice note, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn image_carries_caption() {
        let client = StubAutomation::default();

        send_media(&client, command(false, Some("sunset")))
            .await
            .expect("send should succeed");

        match &client.sent_media()[0].1 {
            OutgoingMedia::Image {
                mimetype, caption, ..
            } => {
                assert_eq!(mimetype, IMAGE_MIMETYPE);
                assert_eq!(caption.as_deref(), Some("sunset"));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_empty_payload_without_calling_client() {
        let client = StubAutomation::default();
        let mut empty = command(false, None);
        empty.data = String::new();

        let result = send_media(&client, empty).await;

        assert_eq!(result, Err(SendMediaError::EmptyPayload));
        assert!(client.calls().is_empty());
    }
}
