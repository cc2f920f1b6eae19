//! Terminal client for the Pomoroom relay.
//!
//! Joins a room, drives a local Pomodoro countdown, shares every tick with the
//! room and applies whatever timer state the room sends back.

mod command;
mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod state;
pub mod timer;
mod ui;

pub use runner::{ClientConfig, run_client};
