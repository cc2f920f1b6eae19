//! UseCase 層
//!
//! リレーの各操作（接続、参加、チャット、タイマー同期、切断）と
//! HTTP 向けの参照系ユースケースを提供します。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod send_chat_message;
mod sync_timer_state;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{GetRoomDetailError, RelayError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use sync_timer_state::SyncTimerStateUseCase;
