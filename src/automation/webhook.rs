use serde::Deserialize;

use crate::{
    automation::wire::WireMessage,
    domain::{events::AutomationEvent, message::InboundMessage},
};

const STATUS_SCAN_QR_CODE: &str = "SCAN_QR_CODE";
const STATUS_WORKING: &str = "WORKING";

/// Event notification posted by the WhatsApp HTTP API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookNotification {
    pub event: String,
    pub session: Option<String>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionStatus {
    status: String,
}

/// Maps a notification to an [`AutomationEvent`]. Notifications for other
/// sessions, unknown events and undecodable payloads yield `None`.
pub fn parse_event(notification: WebhookNotification, session: &str) -> Option<AutomationEvent> {
    if let Some(origin) = notification.session.as_deref() {
        if origin != session {
            return None;
        }
    }

    match notification.event.as_str() {
        "message" => serde_json::from_value::<WireMessage>(notification.payload)
            .ok()
            .map(|message| AutomationEvent::Message(Box::new(InboundMessage::from(message)))),
        "session.status" => {
            let status: SessionStatus = serde_json::from_value(notification.payload).ok()?;
            match status.status.as_str() {
                STATUS_SCAN_QR_CODE => Some(AutomationEvent::QrRequired),
                STATUS_WORKING => Some(AutomationEvent::Ready),
                _ => None,
            }
        }
        _ => None,
    }
}
