//! WebSocket event DTOs.
//!
//! Every frame is a JSON text frame shaped as `{"event": <name>, "data": <payload>}`.
//! Relayed payload fields are kept as raw JSON values of any type. A field a
//! client leaves out is carried as `None` and omitted again when the event is
//! rebroadcast; an explicit `null` is carried as `Some(Value::Null)`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Events sent by a client to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    JoinRoom(JoinRoomPayload),
    ChatMessage(ChatMessageRequest),
    UpdateState(UpdateStateRequest),
}

/// Events sent by the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Sent once to a new connection only.
    Connected(ConnectedPayload),
    ChatMessage(ChatMessagePayload),
    SyncState(TimerStatePayload),
    UserEvent(UserEventPayload),
    UserList(Vec<UserDto>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRoomPayload {
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub room: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessagePayload {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStateRequest {
    #[serde(default)]
    pub room: String,
    #[serde(flatten)]
    pub state: TimerStatePayload,
}

/// Shared timer state as relayed between clients.
///
/// The relay never checks the values; clients interpret them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatePayload {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub time_left: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub is_running: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub is_break: Option<Value>,
}

/// A key that is present yields `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserEventKind {
    Join,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEventPayload {
    #[serde(rename = "type")]
    pub kind: UserEventKind,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedPayload {
    pub id: String,
}

/// Member entry of a `userList` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_room() {
        // テスト項目: joinRoom イベントがパースできる
        // given (前提条件):
        let text = r#"{"event":"joinRoom","data":{"room":"standup","username":"Bea"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinRoom(JoinRoomPayload {
                room: "standup".to_string(),
                username: "Bea".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_join_room_with_missing_fields() {
        // テスト項目: フィールドが欠けた joinRoom も空文字列として受け入れられる
        // given (前提条件):
        let text = r#"{"event":"joinRoom","data":{}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinRoom(JoinRoomPayload {
                room: String::new(),
                username: String::new(),
            })
        );
    }

    #[test]
    fn test_parse_update_state() {
        // テスト項目: updateState イベントがパースできる
        // given (前提条件):
        let text = r#"{"event":"updateState","data":{"room":"R","timeLeft":42,"isRunning":true,"isBreak":false}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        let ClientEvent::UpdateState(request) = event else {
            panic!("expected updateState");
        };
        assert_eq!(request.room, "R");
        assert_eq!(request.state.time_left, Some(json!(42)));
        assert_eq!(request.state.is_running, Some(json!(true)));
        assert_eq!(request.state.is_break, Some(json!(false)));
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        // テスト項目: 未知のイベント名はパースエラーになる
        // given (前提条件):
        let text = r#"{"event":"dance","data":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_user_event() {
        // テスト項目: userEvent が {type, user} 形式でシリアライズされる
        // given (前提条件):
        let event = ServerEvent::UserEvent(UserEventPayload {
            kind: UserEventKind::Leave,
            user: "Cy".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "userEvent", "data": {"type": "leave", "user": "Cy"}})
        );
    }

    #[test]
    fn test_serialize_user_list() {
        // テスト項目: userList がメンバー配列としてシリアライズされる
        // given (前提条件):
        let event = ServerEvent::UserList(vec![UserDto {
            id: "c1".to_string(),
            name: "Bea".to_string(),
            avatar: "https://randomuser.me/api/portraits/men/1.jpg".to_string(),
        }]);

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "userList", "data": [{
                "id": "c1",
                "name": "Bea",
                "avatar": "https://randomuser.me/api/portraits/men/1.jpg"
            }]})
        );
    }

    #[test]
    fn test_missing_chat_fields_are_omitted() {
        // テスト項目: 欠けていたフィールドは再送時にも省略される
        // given (前提条件):
        let event = ServerEvent::ChatMessage(ChatMessagePayload {
            user: None,
            text: Some(json!("hi")),
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"event": "chatMessage", "data": {"text": "hi"}}));
    }

    #[test]
    fn test_null_is_kept_apart_from_absent() {
        // テスト項目: 明示的な null は欠けたフィールドと区別され、null のまま再送される
        // given (前提条件):
        let text = r#"{"event":"chatMessage","data":{"room":"R","user":null,"text":"x"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();
        let ClientEvent::ChatMessage(request) = event else {
            panic!("expected chatMessage");
        };
        let relayed = serde_json::to_value(ServerEvent::ChatMessage(request.clone().into())).unwrap();

        // then (期待する結果):
        assert_eq!(request.user, Some(Value::Null));
        assert_eq!(
            relayed,
            json!({"event": "chatMessage", "data": {"user": null, "text": "x"}})
        );
    }

    #[test]
    fn test_wrong_typed_fields_are_accepted() {
        // テスト項目: 型の違うフィールドもパースエラーにならず、そのままの値で保持される
        // given (前提条件):
        let text = r#"{"event":"updateState","data":{"room":"R","timeLeft":"42","isRunning":1,"isBreak":null}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        let ClientEvent::UpdateState(request) = event else {
            panic!("expected updateState");
        };
        assert_eq!(request.state.time_left, Some(json!("42")));
        assert_eq!(request.state.is_running, Some(json!(1)));
        assert_eq!(request.state.is_break, Some(Value::Null));
    }
}
