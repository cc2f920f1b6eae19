//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ送信と、ルーム単位のブロードキャスト
//! グループ（購読）を抽象化します。
//!
//! 購読はメンバーリストとは独立しています。一度参加したルームの購読は
//! 接続が閉じるまで維持されます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomName};

/// クライアントへの送信チャンネル（JSON テキストを送る）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel);

    /// クライアントを登録解除し、全てのルームの購読からも外す
    ///
    /// 購読していたルームの一覧を返す。
    async fn unregister_client(&self, id: &ConnectionId) -> Vec<RoomName>;

    /// クライアントをルームのブロードキャストグループに追加（冪等）
    async fn subscribe(&self, id: &ConnectionId, room: &RoomName);

    /// 特定のクライアントにメッセージを送信
    async fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// ルームを購読している全てのクライアントにメッセージを送信
    ///
    /// 一部の送信失敗は許容し、実際に送信できた数を返す。
    async fn publish(&self, room: &RoomName, content: &str) -> Result<usize, MessagePushError>;
}
