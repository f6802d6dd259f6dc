//! Push channel.
//!
//! A client connecting to `/ws` first receives the current `doctors:list`, `reviews:list` and
//! `medical:list`, then every event the gateway publishes. Clients may send `reviews:add` and
//! `doctor:medical-info` messages, which go through the same gateway operations as the REST
//! endpoints and are broadcast back to everyone.

use crate::AppState;
use api_shared::{ClientMessage, ServerEvent};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use dash_core::{Gateway, Subscription};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Upgrades `GET /ws` to a WebSocket subscription.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.gateway))
}

async fn handle_socket(socket: WebSocket, gateway: Arc<Gateway>) {
    let Subscription {
        snapshot,
        mut receiver,
    } = gateway.subscribe();
    tracing::info!(
        "client connected ({} subscriber(s))",
        gateway.subscriber_count()
    );

    let (mut sender, mut inbound) = socket.split();

    for event in &snapshot {
        if send_event(&mut sender, event).await.is_err() {
            tracing::info!("client disconnected before the snapshot was sent");
            return;
        }
    }

    let mut push = tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if send_event(&mut sender, &event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("subscriber lagged, skipped {} message(s)", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let inbound_gateway = gateway.clone();
    let mut pull = tokio::spawn(async move {
        while let Some(Ok(message)) = inbound.next().await {
            match message {
                Message::Text(text) => handle_client_message(&inbound_gateway, &text),
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut push => pull.abort(),
        _ = &mut pull => push.abort(),
    }
    tracing::info!("client disconnected");
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(json) => sender.send(Message::Text(json)).await,
        Err(e) => {
            tracing::error!("failed to serialise {}: {}", event.name(), e);
            Ok(())
        }
    }
}

/// Routes an inbound frame to the gateway. Malformed or invalid messages are logged and
/// dropped; the socket stays open.
fn handle_client_message(gateway: &Gateway, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("ignoring unrecognised client message: {}", e);
            return;
        }
    };

    let outcome = match message {
        ClientMessage::AddReview(req) => gateway.create_review(req).map(|_| ()),
        ClientMessage::AddMedicalInfo(body) => gateway.create_medical_info(body).map(|_| ()),
    };
    if let Err(e) = outcome {
        tracing::warn!("client message rejected: {}", e);
    }
}
