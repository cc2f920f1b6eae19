//! Factories for generated values.

use rand::Rng;
use uuid::Uuid;

use super::value_object::{AvatarUrl, ConnectionId};

/// Base URL of the placeholder portrait service.
const AVATAR_BASE_URL: &str = "https://randomuser.me/api/portraits";

/// Portrait categories offered by the placeholder service.
const AVATAR_CATEGORIES: [&str; 2] = ["men", "women"];

/// Number of portraits per category.
const AVATAR_INDEX_COUNT: u32 = 90;

/// Issues a fresh id for every accepted connection.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}

/// Picks a random placeholder avatar.
pub struct AvatarFactory;

impl AvatarFactory {
    pub fn generate() -> AvatarUrl {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> AvatarUrl {
        let category = if rng.gen_bool(0.5) {
            AVATAR_CATEGORIES[0]
        } else {
            AVATAR_CATEGORIES[1]
        };
        let index = rng.gen_range(0..AVATAR_INDEX_COUNT);
        AvatarUrl::new(format!("{AVATAR_BASE_URL}/{category}/{index}.jpg"))
    }
}
