use crate::{
    domain::{
        media::{MediaOutcome, MediaPayload},
        message::InboundMessage,
    },
    usecases::contracts::AutomationClient,
};

const MEDIA_DOWNLOAD_FAILED: &str = "RELAY_MEDIA_DOWNLOAD_FAILED";

/// Downloads the attachment of an image or voice message. Never fails: a
/// missing attachment must not hold back the message itself.
pub async fn extract_media(client: &dyn AutomationClient, message: &InboundMessage) -> MediaOutcome {
    if !message.has_media || !message.message_type.carries_forwarded_media() {
        return MediaOutcome::NotApplicable;
    }

    match client.download_media(message).await {
        Ok(Some(media)) => MediaOutcome::Attached(MediaPayload {
            media_type: message.message_type.as_str().to_owned(),
            data: media.data,
            mimetype: media.mimetype,
        }),
        Ok(None) => MediaOutcome::Unavailable,
        Err(error) => {
            tracing::warn!(
                code = MEDIA_DOWNLOAD_FAILED,
                message_id = %message.id,
                error = %error,
                "media download failed"
            );
            MediaOutcome::Unavailable
        }
    }
}
