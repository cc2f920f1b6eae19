//! WebSocket client session management.

use std::time::Duration;

use futures_util::{Sink, SinkExt, StreamExt};
use pomoroom_server::infrastructure::dto::websocket::ClientEvent;
use pomoroom_shared::time::SystemClock;
use tokio::{sync::mpsc, time::MissedTickBehavior};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    command::Command, error::ClientError, formatter::MessageFormatter, state::ClientState,
    ui::print_with_prompt,
};

/// Run one connection to the relay until the user quits or the connection drops.
///
/// Room state and the timer live in `state` and survive reconnects; input
/// lines arrive on `input_rx` from the readline thread.
pub async fn run_client_session(
    url: &str,
    state: &mut ClientState,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to relay server!");
    println!(
        "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
        state.username()
    );

    let (mut write, mut read) = ws_stream.split();
    send_event(&mut write, &state.join_event()).await?;
    state.mark_joined();
    print_with_prompt(
        &MessageFormatter::format_timer_status(state.timer()),
        state.username(),
    );

    let clock = SystemClock;
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            frame = read.next() => {
                if let Some(text) = handle_frame(frame)?
                    && let Some(display) = state.handle_server_text(&text)
                {
                    print_with_prompt(&display, state.username());
                }
            }
            line = input_rx.recv() => {
                // Readline thread ended (Ctrl+C / Ctrl+D)
                let Some(line) = line else {
                    return Ok(());
                };
                let Some(command) = Command::parse(&line) else {
                    continue;
                };
                let reaction = state.handle_command(command);
                if reaction.quit {
                    write.close().await.ok();
                    return Ok(());
                }
                if let Some(event) = &reaction.outbound {
                    send_event(&mut write, event).await?;
                }
                if let Some(display) = &reaction.display {
                    print_with_prompt(display, state.username());
                }
            }
            _ = ticker.tick() => {
                let reaction = state.on_tick(&clock);
                if let Some(event) = &reaction.outbound {
                    send_event(&mut write, event).await?;
                }
                if let Some(display) = &reaction.display {
                    print_with_prompt(display, state.username());
                }
            }
        }
    }
}

/// Extract the text of an inbound frame, or report the connection as lost
fn handle_frame(
    frame: Option<Result<Message, tungstenite::Error>>,
) -> Result<Option<String>, ClientError> {
    match frame {
        Some(Ok(Message::Text(text))) => Ok(Some(text.as_str().to_string())),
        Some(Ok(Message::Close(_))) | None => {
            tracing::info!("Server closed the connection");
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        Some(Err(e)) => {
            tracing::warn!("WebSocket read error: {}", e);
            Err(ClientError::ConnectionError(e.to_string()))
        }
        Some(Ok(_)) => Ok(None),
    }
}

async fn send_event<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    let json = serde_json::to_string(event)?;
    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send message: {}", e);
        ClientError::ConnectionError(e.to_string())
    })
}
