//! One dashboard connection: alert fan-out plus command request/response.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use crate::{
    gateway::protocol::{decode_command, encode_reply},
    usecases::command_proxy::{ClientCommand, CommandProxy},
};

const SOCKET_FRAME_REJECTED: &str = "SOCKET_FRAME_REJECTED";
const SOCKET_ALERTS_LAGGED: &str = "SOCKET_ALERTS_LAGGED";
const SOCKET_REPLY_ENCODE_FAILED: &str = "SOCKET_REPLY_ENCODE_FAILED";

pub async fn handle_socket(
    socket: WebSocket,
    mut alerts: broadcast::Receiver<Arc<str>>,
    proxy: CommandProxy,
) {
    let (mut sink, mut stream) = socket.split();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    tracing::info!("dashboard connected");

    loop {
        tokio::select! {
            alert = alerts.recv() => {
                match alert {
                    Ok(frame) => {
                        if sink.send(Message::Text(frame.to_string().into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(code = SOCKET_ALERTS_LAGGED, skipped, "dashboard fell behind, alerts dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            reply = reply_rx.recv() => {
                // The loop holds a sender, so the channel never closes here.
                let Some(reply) = reply else { break };
                if sink.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            inbound = stream.next() => {
                let Some(Ok(message)) = inbound else {
                    break;
                };
                match message {
                    Message::Text(text) => match decode_command(text.as_str()) {
                        Ok(command) => spawn_command(&proxy, command, reply_tx.clone()),
                        Err(error) => {
                            tracing::debug!(code = SOCKET_FRAME_REJECTED, error = %error, "dashboard frame ignored");
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    }

    tracing::info!("dashboard disconnected");
}

// Commands run concurrently; replies go back in completion order.
fn spawn_command(proxy: &CommandProxy, command: ClientCommand, replies: mpsc::UnboundedSender<String>) {
    let proxy = proxy.clone();

    tokio::spawn(async move {
        let name = command.name();
        let reply = proxy.dispatch(command).await;

        match encode_reply(&reply) {
            Some(Ok(frame)) => {
                // The connection may be gone by now.
                let _ = replies.send(frame);
            }
            Some(Err(error)) => tracing::error!(
                code = SOCKET_REPLY_ENCODE_FAILED,
                command = name,
                error = %error,
                "reply could not be encoded"
            ),
            None => {}
        }
    });
}
