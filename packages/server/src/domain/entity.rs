//! Entities.

use super::value_object::{AvatarUrl, ConnectionId, RoomName, Timestamp, Username};

/// A connection that has joined a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ConnectionId,
    pub name: Username,
    pub avatar: AvatarUrl,
    pub joined_at: Timestamp,
}

impl User {
    pub fn new(id: ConnectionId, name: Username, avatar: AvatarUrl, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            avatar,
            joined_at,
        }
    }
}

/// A room and its membership list.
///
/// Members are kept in join order. At most one entry exists per connection id;
/// entries with equal names are distinct members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub members: Vec<User>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            members: Vec::new(),
            created_at,
        }
    }

    /// Append `user` unless a member with the same connection id exists.
    ///
    /// Returns `true` if the user was appended.
    pub fn add_member(&mut self, user: User) -> bool {
        if self.contains(&user.id) {
            return false;
        }
        self.members.push(user);
        true
    }

    /// Remove the member with the given connection id, if present.
    pub fn remove_member(&mut self, id: &ConnectionId) -> Option<User> {
        let index = self.members.iter().position(|user| &user.id == id)?;
        Some(self.members.remove(index))
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.members.iter().any(|user| &user.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
