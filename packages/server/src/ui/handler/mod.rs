//! Request handlers.

pub mod event;
pub mod http;
pub mod websocket;
