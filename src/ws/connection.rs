//! WebSocket connection lifecycle management.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::http::routes::AppState;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::room::Outbox;

pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    // channel for server -> client messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!(error = %err, "could not encode server message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let (room, role) = state.rooms.join(tx.clone());

    while let Some(Ok(msg)) = ws_rx.next().await {
        match msg {
            Message::Text(txt) => match serde_json::from_str::<ClientMessage>(&txt) {
                Ok(ClientMessage::Ping) => {
                    reply(&tx, ServerMessage::Pong);
                }
                Ok(ClientMessage::Restart) => {
                    if let Err(err) = room.restart(role) {
                        reply(&tx, ServerMessage::Error { message: err.to_string() });
                    }
                }
                Ok(msg) => {
                    let Some(action) = msg.action() else { continue };
                    if let Err(err) = room.submit(role, action) {
                        reply(&tx, ServerMessage::Error { message: err.to_string() });
                    }
                }
                Err(err) => {
                    reply(&tx, ServerMessage::Error { message: format!("Bad message: {}", err) });
                }
            },
            Message::Close(_) => break,
            Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    tracing::debug!(room = %room.id, %role, "ws closed");
    state.rooms.leave(&room.id, role);
}

fn reply(tx: &Outbox, msg: ServerMessage) {
    if tx.send(msg).is_err() {
        tracing::trace!("outbound task gone, reply dropped");
    }
}
