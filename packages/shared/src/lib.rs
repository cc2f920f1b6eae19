//! Utilities shared by the Pomoroom server and client binaries.

pub mod logger;
pub mod time;
