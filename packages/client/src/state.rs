//! Client-side room state.
//!
//! Turns server events, prompt commands and timer ticks into outbound events
//! and display text. Nothing here touches the network or the terminal.

use pomoroom_server::infrastructure::dto::websocket::{
    ChatMessageRequest, ClientEvent, JoinRoomPayload, ServerEvent, UpdateStateRequest, UserDto,
    UserEventKind,
};
use pomoroom_shared::time::Clock;
use serde_json::Value;

use crate::{
    command::Command,
    formatter::MessageFormatter,
    timer::{PomodoroTimer, SessionLogEntry, TickOutcome, TimerSettings},
};

/// What the session loop should do in response to an input
#[derive(Debug, Default, PartialEq)]
pub struct Reaction {
    pub outbound: Option<ClientEvent>,
    pub display: Option<String>,
    pub quit: bool,
}

impl Reaction {
    fn send(event: ClientEvent) -> Self {
        Self {
            outbound: Some(event),
            ..Self::default()
        }
    }

    fn show(text: String) -> Self {
        Self {
            display: Some(text),
            ..Self::default()
        }
    }

    fn with_display(mut self, text: String) -> Self {
        self.display = Some(text);
        self
    }
}

#[derive(Debug)]
pub struct ClientState {
    room: String,
    username: String,
    my_id: Option<String>,
    timer: PomodoroTimer,
    members: Vec<UserDto>,
    log: Vec<SessionLogEntry>,
    joined: bool,
}

impl ClientState {
    pub fn new(room: String, username: String, settings: TimerSettings) -> Self {
        Self {
            room,
            username,
            my_id: None,
            timer: PomodoroTimer::new(settings),
            members: Vec::new(),
            log: Vec::new(),
            joined: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    /// Record that the current connection got past joining the room
    pub fn mark_joined(&mut self) {
        self.joined = true;
    }

    /// Whether the last connection joined the room, clearing the flag
    pub fn take_joined(&mut self) -> bool {
        std::mem::take(&mut self.joined)
    }

    pub fn join_event(&self) -> ClientEvent {
        ClientEvent::JoinRoom(JoinRoomPayload {
            room: self.room.clone(),
            username: self.username.clone(),
        })
    }

    /// Parse and apply one text frame from the server.
    ///
    /// Frames that are not a known event are logged and ignored.
    pub fn handle_server_text(&mut self, text: &str) -> Option<String> {
        match serde_json::from_str::<ServerEvent>(text) {
            Ok(event) => self.handle_server_event(event),
            Err(e) => {
                tracing::warn!("Ignoring unexpected frame: {} ({})", e, text);
                None
            }
        }
    }

    pub fn handle_server_event(&mut self, event: ServerEvent) -> Option<String> {
        match event {
            ServerEvent::Connected(payload) => {
                tracing::info!("Connected with id '{}'", payload.id);
                self.my_id = Some(payload.id);
                None
            }
            ServerEvent::UserEvent(payload) => Some(match payload.kind {
                UserEventKind::Join => MessageFormatter::format_user_joined(&payload.user),
                UserEventKind::Leave => MessageFormatter::format_user_left(&payload.user),
            }),
            ServerEvent::UserList(members) => {
                self.members = members;
                None
            }
            ServerEvent::ChatMessage(payload) => Some(MessageFormatter::format_chat_message(
                payload.user.as_ref(),
                payload.text.as_ref(),
            )),
            ServerEvent::SyncState(state) => {
                // Echoes of our own ticks land here too; only report mode changes
                self.timer
                    .apply_sync(&state)
                    .then(|| MessageFormatter::format_timer_status(&self.timer))
            }
        }
    }

    pub fn handle_command(&mut self, command: Command) -> Reaction {
        match command {
            Command::Start => {
                self.timer.start();
                self.state_update()
            }
            Command::Pause => {
                self.timer.pause();
                self.state_update()
            }
            Command::Stop => {
                self.timer.stop();
                self.state_update()
            }
            Command::Status => Reaction::show(MessageFormatter::format_timer_status(&self.timer)),
            Command::Users => Reaction::show(MessageFormatter::format_user_list(
                &self.members,
                self.my_id.as_deref(),
            )),
            Command::Log => Reaction::show(MessageFormatter::format_session_log(&self.log)),
            Command::Help => Reaction::show(MessageFormatter::format_help()),
            Command::Quit => Reaction {
                quit: true,
                ..Reaction::default()
            },
            Command::Chat(text) => Reaction::send(ClientEvent::ChatMessage(ChatMessageRequest {
                room: self.room.clone(),
                user: Some(Value::String(self.username.clone())),
                text: Some(Value::String(text)),
            })),
        }
    }

    /// Advance the local countdown by one second
    pub fn on_tick(&mut self, clock: &dyn Clock) -> Reaction {
        match self.timer.tick(clock) {
            TickOutcome::Idle => Reaction::default(),
            TickOutcome::Ticked => {
                let reaction = Reaction::send(self.update_state_event());
                if self.timer.time_left() % 60 == 0 {
                    reaction.with_display(MessageFormatter::format_timer_status(&self.timer))
                } else {
                    reaction
                }
            }
            TickOutcome::Completed(entry) => {
                let text = format!(
                    "{}{}",
                    MessageFormatter::format_phase_complete(&entry),
                    MessageFormatter::format_timer_status(&self.timer)
                );
                self.log.push(entry);
                Reaction::show(text)
            }
        }
    }

    fn state_update(&self) -> Reaction {
        Reaction::send(self.update_state_event())
            .with_display(MessageFormatter::format_timer_status(&self.timer))
    }

    fn update_state_event(&self) -> ClientEvent {
        ClientEvent::UpdateState(UpdateStateRequest {
            room: self.room.clone(),
            state: self.timer.to_payload(),
        })
    }
}
