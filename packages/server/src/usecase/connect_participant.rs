//! UseCase: 接続受付処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() / greet()
//!
//! ### なぜこのテストが必要か
//! - 接続ごとに新しい接続 ID が発行され、MessagePusher に登録されることを保証
//! - 接続直後の挨拶（自分の接続 ID の通知）が本人にだけ届くことを確認

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

use super::error::RelayError;

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を受け付ける
    ///
    /// 新しい接続 ID を発行し、送信チャンネルを MessagePusher に登録する。
    /// この時点ではどのルームにも参加していない。
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        self.message_pusher.register_client(id.clone(), sender).await;
        id
    }

    /// 接続したクライアント本人にだけメッセージ（JSON）を送る
    pub async fn greet(&self, id: &ConnectionId, message: &str) -> Result<(), RelayError> {
        self.message_pusher.push_to(id, message).await?;
        Ok(())
    }
}
