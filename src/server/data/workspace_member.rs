//! Workspace membership repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::workspace::{WorkspaceMembership, WorkspaceRole};

pub struct WorkspaceMemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkspaceMemberRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        workspace_id: i32,
        user_id: i32,
        role: WorkspaceRole,
    ) -> Result<WorkspaceMembership, DbErr> {
        let entity = entity::workspace_member::ActiveModel {
            workspace_id: ActiveValue::Set(workspace_id),
            user_id: ActiveValue::Set(user_id),
            role: ActiveValue::Set(role.to_string()),
            position: ActiveValue::Set(None),
            joined_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(WorkspaceMembership::from_entity(entity))
    }

    pub async fn find_by_id(&self, member_id: i32) -> Result<Option<WorkspaceMembership>, DbErr> {
        let entity = entity::prelude::WorkspaceMember::find_by_id(member_id)
            .one(self.db)
            .await?;

        Ok(entity.map(WorkspaceMembership::from_entity))
    }

    /// Finds the membership of a user in a workspace.
    pub async fn find(
        &self,
        workspace_id: i32,
        user_id: i32,
    ) -> Result<Option<WorkspaceMembership>, DbErr> {
        let entity = entity::prelude::WorkspaceMember::find()
            .filter(entity::workspace_member::Column::WorkspaceId.eq(workspace_id))
            .filter(entity::workspace_member::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(WorkspaceMembership::from_entity))
    }

    /// Gets all memberships of a workspace in join order.
    pub async fn get_by_workspace(&self, workspace_id: i32) -> Result<Vec<WorkspaceMembership>, DbErr> {
        let entities = entity::prelude::WorkspaceMember::find()
            .filter(entity::workspace_member::Column::WorkspaceId.eq(workspace_id))
            .order_by_asc(entity::workspace_member::Column::JoinedAt)
            .order_by_asc(entity::workspace_member::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(WorkspaceMembership::from_entity)
            .collect())
    }

    /// Gets all memberships of a user, most recently joined first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<WorkspaceMembership>, DbErr> {
        let entities = entity::prelude::WorkspaceMember::find()
            .filter(entity::workspace_member::Column::UserId.eq(user_id))
            .order_by_desc(entity::workspace_member::Column::JoinedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(WorkspaceMembership::from_entity)
            .collect())
    }

    pub async fn count_by_workspace(&self, workspace_id: i32) -> Result<u64, DbErr> {
        entity::prelude::WorkspaceMember::find()
            .filter(entity::workspace_member::Column::WorkspaceId.eq(workspace_id))
            .count(self.db)
            .await
    }

    pub async fn update_role(
        &self,
        member_id: i32,
        role: WorkspaceRole,
    ) -> Result<Option<WorkspaceMembership>, DbErr> {
        let Some(entity) = entity::prelude::WorkspaceMember::find_by_id(member_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.role = ActiveValue::Set(role.to_string());
        let updated = active.update(self.db).await?;

        Ok(Some(WorkspaceMembership::from_entity(updated)))
    }

    pub async fn delete(&self, member_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::WorkspaceMember::delete_by_id(member_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
