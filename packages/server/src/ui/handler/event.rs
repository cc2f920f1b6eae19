//! Relay event dispatch.
//!
//! Each WebSocket connection owns a [`ConnectionSession`]. Inbound text frames
//! are parsed into [`ClientEvent`]s and dispatched here; outbound events are
//! encoded to JSON and handed to the use cases for fan-out.

use crate::{
    domain::{ConnectionId, PusherChannel, RoomName, User, Username},
    infrastructure::dto::websocket::{
        ChatMessageRequest, ClientEvent, ConnectedPayload, JoinRoomPayload, ServerEvent,
        UpdateStateRequest, UserDto, UserEventKind, UserEventPayload,
    },
    ui::state::AppState,
};

/// The room a connection joined last, and the name it joined with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub room: RoomName,
    pub username: Username,
}

/// Connection-local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSession {
    pub id: ConnectionId,
    pub joined: Option<JoinedRoom>,
}

impl ConnectionSession {
    pub fn new(id: ConnectionId) -> Self {
        Self { id, joined: None }
    }
}

/// Register a new connection and greet it with its connection id.
pub async fn handle_connect(state: &AppState, sender: PusherChannel) -> ConnectionSession {
    let id = state.connect_participant_usecase.execute(sender).await;
    tracing::info!("Connection '{}' accepted", id);

    let greeting = ServerEvent::Connected(ConnectedPayload {
        id: id.as_str().to_string(),
    });
    if let Some(json) = encode(&greeting)
        && let Err(e) = state.connect_participant_usecase.greet(&id, &json).await
    {
        tracing::warn!("Failed to greet connection '{}': {}", id, e);
    }

    ConnectionSession::new(id)
}

/// Parse one inbound text frame and dispatch it.
///
/// Frames that are not a well-formed event are logged and dropped.
pub async fn handle_text_frame(state: &AppState, session: &mut ConnectionSession, text: &str) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => handle_client_event(state, session, event).await,
        Err(e) => tracing::warn!(
            "Dropping malformed frame from '{}': {} ({})",
            session.id,
            e,
            text
        ),
    }
}

pub async fn handle_client_event(
    state: &AppState,
    session: &mut ConnectionSession,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinRoom(payload) => handle_join_room(state, session, payload).await,
        ClientEvent::ChatMessage(request) => handle_chat_message(state, session, request).await,
        ClientEvent::UpdateState(request) => handle_update_state(state, session, request).await,
    }
}

/// Clean up after the transport closed.
///
/// Membership changes and the `userList` that follows are published under
/// `membership_lock`, so the last list a member sees matches the room.
pub async fn handle_disconnect(state: &AppState, session: &ConnectionSession) {
    let _membership = state.membership_lock.lock().await;
    let joined = session.joined.as_ref();
    let remaining = state
        .disconnect_participant_usecase
        .execute(&session.id, joined.map(|j| &j.room))
        .await;
    tracing::info!("Connection '{}' closed", session.id);

    let (Some(joined), Some(remaining)) = (joined, remaining) else {
        return;
    };

    let left = ServerEvent::UserEvent(UserEventPayload {
        kind: UserEventKind::Leave,
        user: joined.username.as_str().to_string(),
    });
    for event in [left, user_list(remaining)] {
        let Some(json) = encode(&event) else {
            continue;
        };
        if let Err(e) = state
            .disconnect_participant_usecase
            .broadcast_participant_left(&joined.room, &json)
            .await
        {
            tracing::warn!("Failed to broadcast leave to '{}': {}", joined.room, e);
        }
    }
    tracing::info!("'{}' left room '{}'", joined.username, joined.room);
}

async fn handle_join_room(
    state: &AppState,
    session: &mut ConnectionSession,
    payload: JoinRoomPayload,
) {
    let room = RoomName::new(payload.room);
    let username = Username::new(payload.username);

    let _membership = state.membership_lock.lock().await;
    let members = state
        .join_room_usecase
        .execute(session.id.clone(), &room, username.clone())
        .await;
    session.joined = Some(JoinedRoom {
        room: room.clone(),
        username: username.clone(),
    });
    tracing::info!(
        "'{}' ({}) joined room '{}' ({} member(s))",
        username,
        session.id,
        room,
        members.len()
    );

    let joined = ServerEvent::UserEvent(UserEventPayload {
        kind: UserEventKind::Join,
        user: username.into_string(),
    });
    for event in [joined, user_list(members)] {
        let Some(json) = encode(&event) else {
            continue;
        };
        if let Err(e) = state.join_room_usecase.broadcast(&room, &json).await {
            tracing::warn!("Failed to broadcast join to '{}': {}", room, e);
        }
    }
}

async fn handle_chat_message(
    state: &AppState,
    session: &ConnectionSession,
    request: ChatMessageRequest,
) {
    let room = RoomName::new(request.room.clone());
    tracing::debug!("Chat from '{}' to room '{}'", session.id, room);

    let Some(json) = encode(&ServerEvent::ChatMessage(request.into())) else {
        return;
    };
    if let Err(e) = state.send_chat_message_usecase.execute(&room, &json).await {
        tracing::warn!("Failed to relay chat to '{}': {}", room, e);
    }
}

async fn handle_update_state(
    state: &AppState,
    session: &ConnectionSession,
    request: UpdateStateRequest,
) {
    let room = RoomName::new(request.room.clone());
    let Some(json) = encode(&ServerEvent::SyncState(request.into())) else {
        return;
    };
    tracing::debug!(
        "Broadcasting syncState from '{}' to room '{}': {}",
        session.id,
        room,
        json
    );

    if let Err(e) = state.sync_timer_state_usecase.execute(&room, &json).await {
        tracing::warn!("Failed to relay timer state to '{}': {}", room, e);
    }
}

fn user_list(members: Vec<User>) -> ServerEvent {
    ServerEvent::UserList(members.into_iter().map(UserDto::from).collect())
}

fn encode(event: &ServerEvent) -> Option<String> {
    serde_json::to_string(event)
        .inspect_err(|e| tracing::error!("Failed to serialize {:?}: {}", event, e))
        .ok()
}
