// libs/signaling-cell/src/handlers.rs
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::ClientMessage;
use crate::services::CallRelayService;

/// Upgrades the HTTP request to a WebSocket and hands the socket to the
/// relay for the lifetime of the connection.
pub async fn signaling_ws(
    ws: WebSocketUpgrade,
    State(relay): State<CallRelayService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

async fn handle_socket(socket: WebSocket, relay: CallRelayService) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Outbound half: the relay pushes typed messages onto this channel and a
    // writer task serializes them onto the wire.
    let (sender, mut outbound) = mpsc::unbounded_channel();
    let connection_id = relay.register(sender).await;
    info!("Signaling connection {} established", connection_id);

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to serialize outbound message: {}", e);
                    continue;
                }
            };
            if ws_sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = ws_stream.next().await {
        match message {
            Message::Text(text) => dispatch(&relay, connection_id, &text).await,
            Message::Close(_) => break,
            // Pings are answered by axum; binary frames are not part of the
            // signaling vocabulary.
            _ => {}
        }
    }

    relay.disconnect(connection_id).await;
    writer.abort();
    info!("Signaling connection {} closed", connection_id);
}

/// Decodes one inbound frame and routes it to the relay. Frames that do not
/// parse as a known message are logged and ignored; signaling is
/// best-effort and a malformed frame must not tear down the connection.
async fn dispatch(relay: &CallRelayService, connection_id: Uuid, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::RequestRole { role }) => {
            relay.request_role(connection_id, &role).await;
        }
        Ok(ClientMessage::InitiateCall {
            target_role,
            signal,
            from_id,
            display_name,
        }) => {
            relay
                .initiate_call(target_role, signal, from_id, display_name)
                .await;
        }
        Ok(ClientMessage::AcceptCall {
            target_role,
            signal,
        }) => {
            relay.accept_call(target_role, signal).await;
        }
        Err(e) => {
            debug!("Ignoring unparseable frame from connection {}: {}", connection_id, e);
        }
    }
}
