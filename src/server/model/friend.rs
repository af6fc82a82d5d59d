//! Friendship domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::friend::{FriendRequestDto, FriendshipDto},
    server::model::user::User,
};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";

/// A friendship row between two users, pending until the addressee accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct Friendship {
    pub id: i32,
    pub requester_id: i32,
    pub addressee_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    pub fn from_entity(entity: entity::friendship::Model) -> Self {
        Self {
            id: entity.id,
            requester_id: entity.requester_id,
            addressee_id: entity.addressee_id,
            status: entity.status,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> FriendshipDto {
        FriendshipDto {
            id: self.id,
            requester_id: self.requester_id,
            addressee_id: self.addressee_id,
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Returns true if the user is either side of the friendship.
    pub fn involves(&self, user_id: i32) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }

    /// The other party, seen from `user_id`.
    pub fn other_party(&self, user_id: i32) -> i32 {
        if self.requester_id == user_id {
            self.addressee_id
        } else {
            self.requester_id
        }
    }
}

/// A friendship together with both users.
#[derive(Debug, Clone)]
pub struct FriendRequest {
    pub friendship: Friendship,
    pub requester: User,
    pub addressee: User,
}

impl FriendRequest {
    pub fn into_dto(self) -> FriendRequestDto {
        FriendRequestDto {
            id: self.friendship.id,
            status: self.friendship.status,
            requester: self.requester.to_summary_dto(),
            addressee: self.addressee.to_summary_dto(),
            created_at: self.friendship.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_party_is_symmetric() {
        let friendship = Friendship {
            id: 1,
            requester_id: 3,
            addressee_id: 7,
            status: STATUS_PENDING.to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(friendship.other_party(3), 7);
        assert_eq!(friendship.other_party(7), 3);
        assert!(friendship.involves(7));
        assert!(!friendship.involves(5));
    }
}
