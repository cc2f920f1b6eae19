//! Room relay server for a shared Pomodoro timer.
//!
//! Connections join named rooms over WebSocket. Join/leave notifications, chat
//! messages and timer state updates are rebroadcast to every connection in the
//! same room, sender included.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
