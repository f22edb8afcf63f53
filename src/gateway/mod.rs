//! Dashboard-facing HTTP server: WebSocket channel, webhook intake and health.

pub mod hub;
pub mod protocol;
pub mod socket;

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tokio::{net::TcpListener, sync::mpsc};

use crate::{
    automation::webhook::{parse_event, WebhookNotification},
    domain::events::AutomationEvent,
    infra::{config::ServerConfig, error::AppError},
    usecases::{
        command_proxy::CommandProxy,
        context::AppContext,
        relay::{run_event_loop, RelayService},
    },
};

use self::hub::BroadcastHub;

pub const HEALTH_BODY: &str = "WhatsApp Relay Running";

const EVENT_QUEUE_CAPACITY: usize = 1024;
const WEBHOOK_QUEUE_CLOSED: &str = "WEBHOOK_QUEUE_CLOSED";

#[derive(Clone)]
pub struct AppState {
    pub hub: BroadcastHub,
    pub proxy: CommandProxy,
    pub events: mpsc::Sender<AutomationEvent>,
    pub session: Arc<str>,
    pub max_frame_bytes: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ws", get(ws_handler))
        .route("/webhook", post(webhook_handler))
        .fallback(health)
        .with_state(state)
}

/// Binds the listener and serves until Ctrl-C.
pub async fn serve(context: AppContext) -> Result<(), AppError> {
    let addr = listen_addr(&context.config.server)?;

    let hub = BroadcastHub::new();
    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let relay = RelayService::new(context.automation.clone(), Arc::new(hub.clone()));
    tokio::spawn(run_event_loop(events_rx, relay));

    let state = AppState {
        hub,
        proxy: CommandProxy::new(context.automation.clone()),
        events: events_tx,
        session: Arc::from(context.config.automation.session.as_str()),
        max_frame_bytes: context.config.server.max_frame_bytes,
    };

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind { addr, source })?;
    tracing::info!(%addr, "relay listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Serve)?;

    tracing::info!("relay stopped");
    Ok(())
}

fn listen_addr(server: &ServerConfig) -> Result<SocketAddr, AppError> {
    let ip: IpAddr = server
        .host
        .parse()
        .map_err(|_| AppError::ListenAddr(server.host.clone()))?;
    Ok(SocketAddr::new(ip, server.port))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %error, "ctrl-c handler unavailable, serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

async fn health() -> &'static str {
    HEALTH_BODY
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let alerts = state.hub.subscribe();
    let proxy = state.proxy.clone();

    ws.max_message_size(state.max_frame_bytes)
        .max_frame_size(state.max_frame_bytes)
        .on_upgrade(move |socket| socket::handle_socket(socket, alerts, proxy))
}

async fn webhook_handler(
    State(state): State<AppState>,
    Json(notification): Json<WebhookNotification>,
) -> StatusCode {
    let event_name = notification.event.clone();
    let Some(event) = parse_event(notification, &state.session) else {
        tracing::debug!(event = %event_name, "webhook notification ignored");
        return StatusCode::OK;
    };

    if state.events.send(event).await.is_err() {
        tracing::error!(code = WEBHOOK_QUEUE_CLOSED, "inbound event queue is closed");
        return StatusCode::SERVICE_UNAVAILABLE;
    }

    StatusCode::OK
}

/// Returns the gateway module name for smoke checks.
pub fn module_name() -> &'static str {
    "gateway"
}
