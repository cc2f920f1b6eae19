//! Conversion logic between DTOs and domain entities.

use pomoroom_shared::time::timestamp_to_rfc3339;

use crate::domain::entity;
use crate::infrastructure::dto::{http, websocket as ws};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::User> for ws::UserDto {
    fn from(model: entity::User) -> Self {
        Self {
            id: model.id.into_string(),
            name: model.name.into_string(),
            avatar: model.avatar.into_string(),
        }
    }
}

impl From<entity::User> for http::MemberDetailDto {
    fn from(model: entity::User) -> Self {
        Self {
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
            id: model.id.into_string(),
            name: model.name.into_string(),
            avatar: model.avatar.into_string(),
        }
    }
}

impl From<entity::Room> for http::RoomSummaryDto {
    fn from(model: entity::Room) -> Self {
        Self {
            name: model.name.into_string(),
            member_count: model.members.len(),
            members: model
                .members
                .into_iter()
                .map(|user| user.name.into_string())
                .collect(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<entity::Room> for http::RoomDetailDto {
    fn from(model: entity::Room) -> Self {
        Self {
            name: model.name.into_string(),
            members: model.members.into_iter().map(Into::into).collect(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

// ========================================
// Inbound → outbound events (relayed verbatim)
// ========================================

impl From<ws::ChatMessageRequest> for ws::ChatMessagePayload {
    fn from(request: ws::ChatMessageRequest) -> Self {
        Self {
            user: request.user,
            text: request.text,
        }
    }
}

impl From<ws::UpdateStateRequest> for ws::TimerStatePayload {
    fn from(request: ws::UpdateStateRequest) -> Self {
        request.state
    }
}
