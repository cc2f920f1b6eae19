//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomName, RoomRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// # Returns
    ///
    /// * `Ok(Room)` - ルームが存在する
    /// * `Err(GetRoomDetailError::RoomNotFound)` - ルームが存在しない（空になって削除された場合も含む）
    pub async fn execute(&self, room_name: String) -> Result<Room, GetRoomDetailError> {
        let room = self.repository.get_room(&RoomName::new(room_name)).await?;
        Ok(room)
    }
}
