//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() / broadcast()
//!
//! ### なぜこのテストが必要か
//! - 参加したルームのブロードキャストグループに購読されることを保証
//! - 同じ接続から何度参加してもメンバーリストのエントリは 1 つであることを確認
//! - メンバーリストが参加順に保たれることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数の接続が順に参加
//! - エッジケース：同じ接続の再参加、空のユーザー名・ルーム名

use std::sync::Arc;

use pomoroom_shared::time::get_timestamp;

use crate::domain::{
    AvatarFactory, ConnectionId, MessagePusher, RoomName, RoomRepository, Timestamp, User,
    Username,
};

use super::error::RelayError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// 1. 接続をルームのブロードキャストグループに購読させる
    /// 2. ランダムなアバターで User を作り、メンバーリストに追加する
    ///    （同じ接続 ID が既にいれば追加しない）
    ///
    /// # Returns
    ///
    /// 更新後のメンバーリスト（参加順）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room: &RoomName,
        username: Username,
    ) -> Vec<User> {
        self.message_pusher.subscribe(&connection_id, room).await;

        let user = User::new(
            connection_id,
            username,
            AvatarFactory::generate(),
            Timestamp::new(get_timestamp()),
        );
        self.repository.add_member(room, user).await
    }

    /// ルームの全購読者（参加者本人を含む）にメッセージ（JSON）をブロードキャスト
    pub async fn broadcast(&self, room: &RoomName, message: &str) -> Result<usize, RelayError> {
        Ok(self.message_pusher.publish(room, message).await?)
    }
}
