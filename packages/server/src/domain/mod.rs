//! Domain layer: entities, value objects and the interfaces the relay needs.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Room, User};
pub use error::{MessagePushError, RepositoryError};
pub use factory::{AvatarFactory, ConnectionIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{AvatarUrl, ConnectionId, RoomName, Timestamp, Username};
