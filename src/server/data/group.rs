//! Interest group repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::group::{Group, GroupMembership};

pub struct GroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, title: String, description: Option<String>) -> Result<Group, DbErr> {
        let entity = entity::group::ActiveModel {
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Group::from_entity(entity))
    }

    pub async fn find_by_id(&self, group_id: i32) -> Result<Option<Group>, DbErr> {
        let entity = entity::prelude::Group::find_by_id(group_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Group::from_entity))
    }

    pub async fn add_member(
        &self,
        group_id: i32,
        user_id: i32,
        role: &str,
    ) -> Result<GroupMembership, DbErr> {
        let entity = entity::group_member::ActiveModel {
            group_id: ActiveValue::Set(group_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(GroupMembership::from_entity(entity, None))
    }

    pub async fn find_membership(
        &self,
        group_id: i32,
        user_id: i32,
    ) -> Result<Option<GroupMembership>, DbErr> {
        let entity = entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(|m| GroupMembership::from_entity(m, None)))
    }

    /// Gets a user's memberships with their groups, most recently joined first.
    pub async fn get_memberships_for_user(&self, user_id: i32) -> Result<Vec<GroupMembership>, DbErr> {
        let rows = entity::prelude::GroupMember::find()
            .find_also_related(entity::prelude::Group)
            .filter(entity::group_member::Column::UserId.eq(user_id))
            .order_by_desc(entity::group_member::Column::JoinedAt)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(member, group)| GroupMembership::from_entity(member, group))
            .collect())
    }

    /// Gets the membership rows of a group in join order.
    pub async fn get_members(&self, group_id: i32) -> Result<Vec<GroupMembership>, DbErr> {
        let entities = entity::prelude::GroupMember::find()
            .filter(entity::group_member::Column::GroupId.eq(group_id))
            .order_by_asc(entity::group_member::Column::JoinedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|m| GroupMembership::from_entity(m, None))
            .collect())
    }
}
