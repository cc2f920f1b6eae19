//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メンバーのいる全てのルームを名前順で返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{AvatarUrl, ConnectionId, RoomName, Timestamp, User, Username},
        infrastructure::repository::InMemoryRoomRepository,
    };

    #[tokio::test]
    async fn test_get_rooms_lists_active_rooms() {
        // テスト項目: メンバーのいるルームが名前順で返される
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        for (room, id) in [("zeta", "c1"), ("alpha", "c2")] {
            repository
                .add_member(
                    &RoomName::new(room),
                    User::new(
                        ConnectionId::new(id),
                        Username::new("Bea"),
                        AvatarUrl::new("https://randomuser.me/api/portraits/men/0.jpg"),
                        Timestamp::new(1000),
                    ),
                )
                .await;
        }
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: ルームがなければ空のリストが返される
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(Arc::new(InMemoryRoomRepository::new()));

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }
}
