//! Message formatting utilities for client display.

use pomoroom_server::infrastructure::dto::websocket::UserDto;
use serde_json::Value;

use crate::timer::{Phase, PomodoroTimer, SessionLogEntry};

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format seconds as "MM:SS"
    pub fn format_time(seconds: i64) -> String {
        let sign = if seconds < 0 { "-" } else { "" };
        let seconds = seconds.unsigned_abs();
        format!("{}{:02}:{:02}", sign, seconds / 60, seconds % 60)
    }

    /// Format the countdown line, e.g. `[focus] 09:59 (running)`
    pub fn format_timer_status(timer: &PomodoroTimer) -> String {
        let state = if timer.is_running() {
            "running"
        } else {
            "paused"
        };
        format!(
            "\n[{}] {} ({})\n",
            timer.phase().label(),
            Self::format_time(timer.time_left()),
            state
        )
    }

    pub fn format_user_joined(user: &str) -> String {
        format!("\n+ {} joined the session\n", user)
    }

    pub fn format_user_left(user: &str) -> String {
        format!("\n- {} left the session\n", user)
    }

    /// Format the member list, marking this connection with "(me)"
    ///
    /// # Arguments
    ///
    /// * `members` - Members in join order
    /// * `my_id` - This connection's id, once the server has announced it
    pub fn format_user_list(members: &[UserDto], my_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\nMembers:\n", RULE));

        if members.is_empty() {
            output.push_str("(No members)\n");
        } else {
            for member in members {
                let is_me = my_id == Some(member.id.as_str());
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", member.name, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a chat message. Absent fields are shown as placeholders.
    /// Strings are shown as-is, other JSON values as JSON text.
    pub fn format_chat_message(user: Option<&Value>, text: Option<&Value>) -> String {
        format!(
            "\n@{}: {}\n",
            chat_field(user).unwrap_or_else(|| "(unknown)".to_string()),
            chat_field(text).unwrap_or_default()
        )
    }

    pub fn format_phase_complete(entry: &SessionLogEntry) -> String {
        let message = match entry.phase {
            Phase::Focus => format!(
                "You stayed focused for {} minutes! Break started.",
                entry.duration_minutes
            ),
            Phase::Break => "Break over! Type /start to focus again.".to_string(),
        };
        format!("\n*** {} ({}) ***\n", message, entry.time)
    }

    pub fn format_session_log(entries: &[SessionLogEntry]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\nSession log:\n", RULE));

        if entries.is_empty() {
            output.push_str("(No finished sessions)\n");
        } else {
            for entry in entries {
                output.push_str(&format!(
                    "{} {} - {} min\n",
                    entry.time,
                    entry.phase.label(),
                    entry.duration_minutes
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_help() -> String {
        "\nCommands:\n\
         \x20 /start   start or resume the timer\n\
         \x20 /pause   pause the timer\n\
         \x20 /stop    stop and reset the current phase\n\
         \x20 /status  show the timer\n\
         \x20 /users   show who is in the room\n\
         \x20 /log     show finished sessions\n\
         \x20 /help    show this help\n\
         \x20 /quit    leave\n\
         Anything else is sent as a chat message.\n"
            .to_string()
    }
}

fn chat_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
