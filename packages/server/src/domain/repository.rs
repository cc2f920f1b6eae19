//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, RepositoryError, Room, RoomName, User};

/// Room Repository trait
///
/// ルーム名 → メンバーリストの対応を保持するストアへのインターフェース。
/// ルームは最初の参加で暗黙的に作成され、メンバーがいなくなると削除される。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// メンバーを追加し、更新後のメンバーリストを返す
    ///
    /// 同じ接続 ID のメンバーが既に存在する場合は追加しない。
    async fn add_member(&self, room: &RoomName, user: User) -> Vec<User>;

    /// メンバーを削除し、残りのメンバーリストを返す
    async fn remove_member(&self, room: &RoomName, id: &ConnectionId) -> Vec<User>;

    /// Room エンティティを取得
    async fn get_room(&self, room: &RoomName) -> Result<Room, RepositoryError>;

    /// 全てのルームを名前順で取得
    async fn get_rooms(&self) -> Vec<Room>;
}
