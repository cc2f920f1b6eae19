//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError};

/// リレー（送信・ブロードキャスト）の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("broadcast failed: {0}")]
    BroadcastFailed(String),
}

impl From<MessagePushError> for RelayError {
    fn from(e: MessagePushError) -> Self {
        Self::BroadcastFailed(e.to_string())
    }
}

/// ルーム詳細取得の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}

impl From<RepositoryError> for GetRoomDetailError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::RoomNotFound(_) => Self::RoomNotFound,
        }
    }
}
