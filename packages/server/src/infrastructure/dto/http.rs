//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Summary of a room for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    /// Member names in join order
    pub members: Vec<String>,
    pub member_count: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Member entry of a room detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub id: String,
    pub name: String,
    pub avatar: String,
    /// RFC 3339
    pub joined_at: String,
}

/// Detailed information of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    pub members: Vec<MemberDetailDto>,
    /// RFC 3339
    pub created_at: String,
}
