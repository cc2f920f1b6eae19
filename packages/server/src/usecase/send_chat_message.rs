//! UseCase: チャットメッセージのリレー
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute()
//!
//! ### なぜこのテストが必要か
//! - 送信者を含むルームの購読者全員に、ちょうど 1 回ずつ届くことを保証
//! - 参加していないルームにも送信できる（受信の制限がない）ことを確認

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomName};

use super::error::RelayError;

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendChatMessageUseCase {
    /// 新しい SendChatMessageUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// チャットメッセージ（JSON）をルームの全購読者にブロードキャスト
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 送信できたクライアント数
    /// * `Err(RelayError)` - ブロードキャスト失敗
    pub async fn execute(&self, room: &RoomName, message: &str) -> Result<usize, RelayError> {
        let delivered = self.message_pusher.publish(room, message).await?;
        tracing::debug!("Chat message relayed to {} client(s) in '{}'", delivered, room);
        Ok(delivered)
    }
}
