//! Event relay: turns automation client events into dashboard broadcasts.
//!
//! Events are consumed from a queue and each one is handled on its own task.
//! Delivery is at-most-once; a failing event is logged and dropped.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        events::{now_unix_secs, AutomationEvent, MessageEnvelope},
        message::InboundMessage,
        text::resolve_text,
    },
    infra::terminal_qr,
    usecases::{
        contracts::{AutomationClient, Broadcaster},
        extract_media::extract_media,
    },
};

const RELAY_PAIRING_CODE_FAILED: &str = "RELAY_PAIRING_CODE_FAILED";
const RELAY_QR_RENDER_FAILED: &str = "RELAY_QR_RENDER_FAILED";
const RELAY_EVENT_LOOP_STOPPED: &str = "RELAY_EVENT_LOOP_STOPPED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Broadcast { receivers: usize },
    NoListeners,
}

#[derive(Clone)]
pub struct RelayService {
    client: Arc<dyn AutomationClient>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl RelayService {
    pub fn new(client: Arc<dyn AutomationClient>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            client,
            broadcaster,
        }
    }

    pub async fn handle_event(&self, event: AutomationEvent) {
        match event {
            AutomationEvent::QrRequired => self.show_pairing_code().await,
            AutomationEvent::Ready => {
                tracing::info!("whatsapp session is ready, relay is live");
            }
            AutomationEvent::Message(message) => {
                let outcome = self.relay_message(&message).await;
                tracing::debug!(
                    message_id = %message.id,
                    outcome = ?outcome,
                    "inbound message relayed"
                );
            }
        }
    }

    /// Normalizes one inbound message and broadcasts it to every dashboard.
    pub async fn relay_message(&self, message: &InboundMessage) -> RelayOutcome {
        let envelope = self.build_envelope(message).await;

        match self.broadcaster.broadcast_message(envelope) {
            0 => RelayOutcome::NoListeners,
            receivers => RelayOutcome::Broadcast { receivers },
        }
    }

    async fn build_envelope(&self, message: &InboundMessage) -> MessageEnvelope {
        let chat_name = message.sender_display_name();
        let body = resolve_text(message);
        let media = extract_media(self.client.as_ref(), message)
            .await
            .into_payload();

        MessageEnvelope {
            chat_id: message.from.clone(),
            chat_name,
            body,
            media,
            timestamp: now_unix_secs(),
            unread: true,
        }
    }

    async fn show_pairing_code(&self) {
        let code = match self.client.pairing_code().await {
            Ok(code) => code,
            Err(error) => {
                tracing::warn!(
                    code = RELAY_PAIRING_CODE_FAILED,
                    error = %error,
                    "pairing code is not available"
                );
                return;
            }
        };

        match terminal_qr::render(&code) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => tracing::warn!(
                code = RELAY_QR_RENDER_FAILED,
                error = %error,
                "failed to render pairing QR code"
            ),
        }
    }
}

/// Drains the inbound event queue, one task per event, until every sender
/// is dropped.
pub async fn run_event_loop(mut events: mpsc::Receiver<AutomationEvent>, relay: RelayService) {
    while let Some(event) = events.recv().await {
        let relay = relay.clone();
        tokio::spawn(async move { relay.handle_event(event).await });
    }

    tracing::info!(code = RELAY_EVENT_LOOP_STOPPED, "inbound event queue closed");
}
