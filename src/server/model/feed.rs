//! Social feed events.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::feed::FeedEventDto;

pub const GOAL_CREATED: &str = "goal_created";
pub const ACHIEVEMENT_UNLOCKED: &str = "achievement_unlocked";
pub const FRIEND_REQUEST_RECEIVED: &str = "friend_request_received";
pub const FRIEND_ADDED: &str = "friend_added";

/// Something that happened to a user, shown to them and their friends.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEvent {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl FeedEvent {
    pub fn from_entity(entity: entity::feed_event::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            data: entity.data,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> FeedEventDto {
        FeedEventDto {
            id: self.id,
            user_id: self.user_id,
            kind: self.kind,
            data: self.data,
            created_at: self.created_at,
        }
    }
}
