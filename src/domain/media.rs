use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Attachment bytes as returned by the automation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedMedia {
    pub mimetype: String,
    /// Base64 encoded bytes.
    pub data: String,
}

impl DownloadedMedia {
    pub fn from_bytes(mimetype: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mimetype: mimetype.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

/// Attachment forwarded to dashboards alongside a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub media_type: String,
    pub data: String,
    pub mimetype: String,
}

/// Result of a best-effort media extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    Attached(MediaPayload),
    /// No media flag, or a type whose media is not forwarded.
    NotApplicable,
    /// The download failed or produced nothing.
    Unavailable,
}

impl MediaOutcome {
    pub fn into_payload(self) -> Option<MediaPayload> {
        match self {
            Self::Attached(payload) => Some(payload),
            Self::NotApplicable | Self::Unavailable => None,
        }
    }
}

/// What a dashboard asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMedia {
    Image {
        mimetype: String,
        filename: String,
        data: String,
        caption: Option<String>,
    },
    VoiceNote {
        mimetype: String,
        filename: String,
        data: String,
    },
}

pub const IMAGE_MIMETYPE: &str = "image/jpeg";
pub const IMAGE_FILENAME: &str = "photo.jpg";
pub const VOICE_MIMETYPE: &str = "audio/ogg; codecs=opus";
pub const VOICE_FILENAME: &str = "voice.ogg";

impl OutgoingMedia {
    /// Packages base64 `data` either as a voice note or as a captioned JPEG.
    pub fn package(data: String, is_audio: bool, caption: Option<String>) -> Self {
        if is_audio {
            return Self::VoiceNote {
                mimetype: VOICE_MIMETYPE.to_owned(),
                filename: VOICE_FILENAME.to_owned(),
                data,
            };
        }

        Self::Image {
            mimetype: IMAGE_MIMETYPE.to_owned(),
            filename: IMAGE_FILENAME.to_owned(),
            data,
            caption: caption.filter(|caption| !caption.trim().is_empty()),
        }
    }
}
