//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use super::event::{ConnectionSession, handle_connect, handle_disconnect, handle_text_frame};
use crate::ui::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that forwards queued outbound frames to the WebSocket sink.
///
/// The task ends when the channel closes or the peer stops accepting frames.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn recv_loop(
    state: &AppState,
    session: &mut ConnectionSession,
    receiver: &mut SplitStream<WebSocket>,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error on '{}': {}", session.id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text from '{}': {}", session.id, text);
                handle_text_frame(state, session, text.as_str()).await;
            }
            Message::Ping(_) => {
                // axum answers pings itself
                tracing::debug!("Received ping");
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", session.id);
                break;
            }
            Message::Binary(_) => {
                tracing::warn!("Ignoring binary frame from '{}'", session.id);
            }
            Message::Pong(_) => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    let mut session = handle_connect(&state, tx).await;
    let mut send_task = pusher_loop(rx, sender);

    // Whichever side finishes first ends the connection
    tokio::select! {
        _ = recv_loop(&state, &mut session, &mut receiver) => send_task.abort(),
        _ = &mut send_task => {},
    };

    handle_disconnect(&state, &session).await;
}
