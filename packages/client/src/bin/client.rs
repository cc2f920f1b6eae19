//! Terminal client for a shared Pomodoro room.
//!
//! Joins a room on the relay server, runs a local countdown that every member
//! sees, and sends any non-command line as a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin pomoroom-client -- --room standup --name Bea
//! cargo run --bin pomoroom-client -- -r standup -n Cy -u ws://127.0.0.1:4000/ws
//! ```

use clap::Parser;

use pomoroom_client::{ClientConfig, run_client, timer::TimerSettings};
use pomoroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "pomoroom-client")]
#[command(about = "Terminal client for a shared Pomodoro timer room", long_about = None)]
struct Args {
    /// Relay server WebSocket URL
    #[arg(
        short = 'u',
        long,
        env = "POMOROOM_URL",
        default_value = "ws://127.0.0.1:4000/ws"
    )]
    url: String,

    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name shown to the room
    #[arg(short = 'n', long)]
    name: String,

    /// Focus phase length in minutes
    #[arg(long, default_value_t = 10)]
    focus_minutes: u32,

    /// Break phase length in minutes
    #[arg(long, default_value_t = 5)]
    break_minutes: u32,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ClientConfig {
        url: args.url,
        room: args.room,
        username: args.name,
        settings: TimerSettings {
            focus_minutes: args.focus_minutes,
            break_minutes: args.break_minutes,
        },
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
