//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() / broadcast_participant_left()
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がメンバーリストから消えることを保証
//! - 残りのメンバーにだけ退出通知が届くことを確認
//! - 一度も参加していない接続の切断では何も起きないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断
//! - エッジケース：最後のメンバーの切断（ルームが消える）、未参加の接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomName, RoomRepository, User};

use super::error::RelayError;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 1. MessagePusher から登録解除（全ルームの購読からも外れる）
    /// 2. 最後に参加したルームがあれば、そのメンバーリストから削除
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID
    /// * `joined_room` - 接続が最後に参加したルーム（未参加なら `None`）
    ///
    /// # Returns
    ///
    /// * `Some(Vec<User>)` - 残りのメンバーリスト（通知が必要）
    /// * `None` - 未参加のため通知不要
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        joined_room: Option<&RoomName>,
    ) -> Option<Vec<User>> {
        let groups = self.message_pusher.unregister_client(connection_id).await;
        tracing::debug!(
            "Connection '{}' left {} broadcast group(s): {:?}",
            connection_id,
            groups.len(),
            groups
        );

        let room = joined_room?;
        Some(self.repository.remove_member(room, connection_id).await)
    }

    /// 退出したことをルームの残りの購読者にブロードキャスト
    pub async fn broadcast_participant_left(
        &self,
        room: &RoomName,
        message: &str,
    ) -> Result<usize, RelayError> {
        Ok(self.message_pusher.publish(room, message).await?)
    }
}
