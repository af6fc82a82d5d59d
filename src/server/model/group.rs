//! Interest group models.

use chrono::{DateTime, Utc};

use crate::{
    model::group::{GroupDto, GroupMemberDto, GroupMembershipDto},
    server::model::user::User,
};

pub const ROLE_OWNER: &str = "owner";
pub const ROLE_MEMBER: &str = "member";

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn from_entity(entity: entity::group::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> GroupDto {
        GroupDto {
            id: self.id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

/// A user's membership in a group, optionally with the group loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMembership {
    pub id: i32,
    pub group_id: i32,
    pub user_id: i32,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub group: Option<Group>,
}

impl GroupMembership {
    pub fn from_entity(entity: entity::group_member::Model, group: Option<entity::group::Model>) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            user_id: entity.user_id,
            role: entity.role,
            joined_at: entity.joined_at,
            group: group.map(Group::from_entity),
        }
    }

    pub fn into_dto(self) -> GroupMembershipDto {
        GroupMembershipDto {
            id: self.id,
            group_id: self.group_id,
            user_id: self.user_id,
            role: self.role,
            joined_at: self.joined_at,
            group: self.group.map(Group::into_dto),
        }
    }
}

/// A group member with their public profile.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub id: i32,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub user: User,
}

impl GroupMember {
    pub fn into_dto(self) -> GroupMemberDto {
        GroupMemberDto {
            id: self.id,
            role: self.role,
            joined_at: self.joined_at,
            user: self.user.to_summary_dto(),
        }
    }
}
