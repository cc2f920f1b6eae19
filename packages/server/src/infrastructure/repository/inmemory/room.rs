//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセスが終了すると全て失われます。
//!
//! マップ全体を 1 つの Mutex で保護します。メンバーリストの更新と
//! 更新後リストのスナップショット取得は同じロックの中で行います。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RepositoryError, Room, RoomName, RoomRepository, User};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// ルーム名 → Room
    rooms: Mutex<HashMap<RoomName, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_member(&self, room: &RoomName, user: User) -> Vec<User> {
        let mut rooms = self.rooms.lock().await;
        let entry = rooms.entry(room.clone()).or_insert_with(|| {
            tracing::debug!("Room '{}' created", room);
            Room::new(room.clone(), user.joined_at)
        });
        if !entry.add_member(user) {
            tracing::debug!("Connection already listed in room '{}'", room);
        }
        entry.members.clone()
    }

    async fn remove_member(&self, room: &RoomName, id: &ConnectionId) -> Vec<User> {
        let mut rooms = self.rooms.lock().await;
        let Some(entry) = rooms.get_mut(room) else {
            return Vec::new();
        };
        entry.remove_member(id);
        if entry.is_empty() {
            rooms.remove(room);
            tracing::debug!("Room '{}' is empty and was removed", room);
            return Vec::new();
        }
        entry.members.clone()
    }

    async fn get_room(&self, room: &RoomName) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room.as_str().to_string()))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut all: Vec<Room> = rooms.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}
