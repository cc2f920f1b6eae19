//! UI layer: axum router, WebSocket and HTTP handlers.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::event::{ConnectionSession, JoinedRoom};
pub use server::Server;
