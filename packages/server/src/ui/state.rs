//! Server state shared by all handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase, JoinRoomUseCase, SendChatMessageUseCase, SyncTimerStateUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendChatMessageUseCase（チャットリレーのユースケース）
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    /// SyncTimerStateUseCase（タイマー状態リレーのユースケース）
    pub sync_timer_state_usecase: Arc<SyncTimerStateUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// メンバーリストの変更から userList の配信までを直列化するロック
    pub membership_lock: Mutex<()>,
}
