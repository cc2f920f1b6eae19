//! UseCase: タイマー状態のリレー
//!
//! サーバーはタイマー状態を保持も解釈もしない。受け取った値をそのまま
//! ルームに流すだけで、最後に届いた更新が勝つ。

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomName};

use super::error::RelayError;

/// タイマー状態同期のユースケース
pub struct SyncTimerStateUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SyncTimerStateUseCase {
    /// 新しい SyncTimerStateUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// syncState メッセージ（JSON）をルームの全購読者にブロードキャスト
    pub async fn execute(&self, room: &RoomName, message: &str) -> Result<usize, RelayError> {
        let delivered = self.message_pusher.publish(room, message).await?;
        tracing::debug!("Timer state relayed to {} client(s) in '{}'", delivered, room);
        Ok(delivered)
    }
}
