//! Display text for a message, with a fixed fallback chain so dashboards
//! never render an empty bubble.

use super::message::{InboundMessage, MessageType};

/// Returns a non-empty, human-readable label for `message`.
///
/// Blank means empty after trimming; a chosen value is returned as-is.
pub fn resolve_text(message: &InboundMessage) -> String {
    if !is_blank(&message.body) {
        return message.body.clone();
    }

    if let Some(raw) = &message.raw {
        let fallback = [&raw.body, &raw.caption, &raw.title]
            .into_iter()
            .flatten()
            .find(|value| !is_blank(value));

        if let Some(value) = fallback {
            return value.clone();
        }
    }

    type_label(&message.message_type)
}

fn type_label(message_type: &MessageType) -> String {
    match message_type {
        MessageType::Interactive => "🤖 [Interactive/Menu]".to_owned(),
        MessageType::List => "📋 [List Options]".to_owned(),
        MessageType::Image => "📷 Photo".to_owned(),
        MessageType::Video => "🎥 Video".to_owned(),
        MessageType::Ptt | MessageType::Audio => "🎤 Voice Note".to_owned(),
        MessageType::Sticker => "👾 Sticker".to_owned(),
        other => format!("[Content: {}]", other.as_str()),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
