//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket 接続ごとの `UnboundedSender` を管理
//! - ルーム単位のブロードキャストグループ（購読）を管理
//! - クライアントへのメッセージ送信（push_to, publish）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomName};

#[derive(Default)]
struct PusherState {
    /// 接続中のクライアントの sender
    clients: HashMap<ConnectionId, PusherChannel>,
    /// ルーム名 → 購読しているクライアント（購読順）
    groups: HashMap<RoomName, Vec<ConnectionId>>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(id.clone(), tx).await;
/// pusher.subscribe(&id, &room).await;
/// pusher.publish(&room, "{\"event\":\"chatMessage\",...}").await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    state: Mutex<PusherState>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel) {
        let mut state = self.state.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", id);
        state.clients.insert(id, sender);
    }

    async fn unregister_client(&self, id: &ConnectionId) -> Vec<RoomName> {
        let mut state = self.state.lock().await;
        state.clients.remove(id);

        let mut left = Vec::new();
        state.groups.retain(|room, subscribers| {
            let before = subscribers.len();
            subscribers.retain(|subscriber| subscriber != id);
            if subscribers.len() != before {
                left.push(room.clone());
            }
            !subscribers.is_empty()
        });
        left.sort();

        tracing::debug!(
            "Client '{}' unregistered from MessagePusher ({} group(s) left)",
            id,
            left.len()
        );
        left
    }

    async fn subscribe(&self, id: &ConnectionId, room: &RoomName) {
        let mut state = self.state.lock().await;
        let subscribers = state.groups.entry(room.clone()).or_default();
        if !subscribers.contains(id) {
            subscribers.push(id.clone());
            tracing::debug!("Client '{}' subscribed to room '{}'", id, room);
        }
    }

    async fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError> {
        let state = self.state.lock().await;

        let sender = state
            .clients
            .get(id)
            .ok_or_else(|| MessagePushError::ClientNotFound(id.as_str().to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to client '{}'", id);
        Ok(())
    }

    async fn publish(&self, room: &RoomName, content: &str) -> Result<usize, MessagePushError> {
        let state = self.state.lock().await;

        let Some(subscribers) = state.groups.get(room) else {
            tracing::debug!("No subscribers in room '{}', nothing to publish", room);
            return Ok(0);
        };

        let mut delivered = 0;
        for subscriber in subscribers {
            match state.clients.get(subscriber) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push message to client '{}': {}", subscriber, e)
                    }
                },
                None => tracing::warn!(
                    "Client '{}' not found during publish, skipping",
                    subscriber
                ),
            }
        }

        tracing::debug!(
            "Published message to {}/{} client(s) in room '{}'",
            delivered,
            subscribers.len(),
            room
        );
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定のクライアントへの送信
    // - publish: ルームの購読者全員への送信（送信者を含む）
    // - 購読の冪等性と、登録解除による全グループからの離脱
    // - ルーム間でメッセージが混ざらないこと
    // ========================================

    async fn register(
        pusher: &WebSocketMessagePusher,
        id: &str,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::new(id);
        pusher.register_client(id.clone(), tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントにメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx) = register(&pusher, "alice").await;

        // when (操作):
        let result = pusher.push_to(&alice, "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher
            .push_to(&ConnectionId::new("nonexistent"), "Hello")
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("nonexistent".to_string()))
        );
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber_once() {
        // テスト項目: ルームの購読者全員に 1 回ずつ届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room = RoomName::new("standup");
        let (alice, mut rx1) = register(&pusher, "alice").await;
        let (bob, mut rx2) = register(&pusher, "bob").await;
        pusher.subscribe(&alice, &room).await;
        pusher.subscribe(&bob, &room).await;
        pusher.subscribe(&bob, &room).await;

        // when (操作):
        let delivered = pusher.publish(&room, "tick").await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("tick".to_string()));
        assert_eq!(rx2.recv().await, Some("tick".to_string()));
        assert!(rx1.try_recv().is_err());
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_does_not_leak_to_other_rooms() {
        // テスト項目: 別のルームの購読者には届かない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, mut rx_a) = register(&pusher, "alice").await;
        let (bob, mut rx_b) = register(&pusher, "bob").await;
        pusher.subscribe(&alice, &RoomName::new("A")).await;
        pusher.subscribe(&bob, &RoomName::new("B")).await;

        // when (操作):
        pusher.publish(&RoomName::new("A"), "only-a").await.unwrap();

        // then (期待する結果):
        assert_eq!(rx_a.recv().await, Some("only-a".to_string()));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_to_empty_room() {
        // テスト項目: 購読者がいないルームへの送信はエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.publish(&RoomName::new("empty"), "Message").await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
    }

    #[tokio::test]
    async fn test_publish_skips_closed_channels() {
        // テスト項目: 受信側が閉じたクライアントはスキップされる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let room = RoomName::new("standup");
        let (alice, mut rx1) = register(&pusher, "alice").await;
        let (bob, rx2) = register(&pusher, "bob").await;
        pusher.subscribe(&alice, &room).await;
        pusher.subscribe(&bob, &room).await;
        drop(rx2);

        // when (操作):
        let delivered = pusher.publish(&room, "hello").await.unwrap();

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx1.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_leaves_all_groups() {
        // テスト項目: 登録解除で全てのルームの購読から外れ、空のグループは削除される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (alice, _rx1) = register(&pusher, "alice").await;
        let (bob, mut rx2) = register(&pusher, "bob").await;
        pusher.subscribe(&alice, &RoomName::new("A")).await;
        pusher.subscribe(&alice, &RoomName::new("B")).await;
        pusher.subscribe(&bob, &RoomName::new("B")).await;

        // when (操作):
        let left = pusher.unregister_client(&alice).await;

        // then (期待する結果):
        assert_eq!(left, vec![RoomName::new("A"), RoomName::new("B")]);
        assert_eq!(pusher.publish(&RoomName::new("A"), "a").await.unwrap(), 0);
        assert_eq!(pusher.publish(&RoomName::new("B"), "b").await.unwrap(), 1);
        assert_eq!(rx2.recv().await, Some("b".to_string()));
        assert!(pusher.push_to(&bob, "still here").await.is_ok());
        assert!(pusher.push_to(&alice, "gone").await.is_err());
    }
}
