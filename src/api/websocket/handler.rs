//! WebSocket connection handler

use std::future;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::state::AppState;
use crate::chat::{ConnectionHandle, Outbound};
use crate::error::ChatError;

/// `GET /ws/:participant` upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(participant): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, participant, state))
}

/// Run one participant's session over a WebSocket.
///
/// A writer task owns the sink and drains the connection's outbound queue;
/// the broadcaster consumes the inbound text frames.
async fn handle_socket(socket: WebSocket, participant: String, state: Arc<AppState>) {
    let (sink, stream) = socket.split();
    let (connection, outbound) = ConnectionHandle::channel(participant);
    let writer = tokio::spawn(write_outbound(sink, outbound));

    // Text frames until the client closes; control and binary frames are skipped
    let inbound = stream
        .take_while(|msg| future::ready(!matches!(msg, Ok(Message::Close(_)))))
        .filter_map(|msg| {
            future::ready(match msg {
                Ok(Message::Text(text)) => Some(Ok(text)),
                Ok(_) => None,
                Err(e) => Some(Err(ChatError::Io(std::io::Error::other(e)))),
            })
        });

    let state_at_exit = state.broadcaster.run_session(connection, inbound).await;
    debug!(state = ?state_at_exit, "websocket session finished");

    let _ = writer.await;
}

/// Forward queued frames to the socket until closed
async fn write_outbound(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
) {
    while let Some(frame) = outbound.recv().await {
        match frame {
            Outbound::Text(text) => {
                if sink.send(Message::Text(text)).await.is_err() {
                    break; // Client disconnected
                }
            }
            Outbound::Close => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
        }
    }
}
