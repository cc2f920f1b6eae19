//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that ended the session
/// * `current_attempt` - The number of reconnection attempts made so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Encoding failures will not go away by reconnecting
    if !matches!(error, ClientError::ConnectionError(_)) {
        return false;
    }

    current_attempt < max_attempts
}

/// Reconnection attempts to count after a session ended.
///
/// A session that got as far as joining the room starts a fresh series of
/// attempts; one that never joined keeps counting.
pub fn reconnect_attempts_after(previous_attempts: u32, joined: bool) -> u32 {
    if joined { 0 } else { previous_attempts }
}
