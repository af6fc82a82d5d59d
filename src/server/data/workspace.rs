//! Workspace repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter,
};

use crate::server::model::workspace::{
    CreateWorkspaceParam, UpdateWorkspaceParam, Workspace, DEFAULT_PLAN,
};

pub struct WorkspaceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkspaceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: CreateWorkspaceParam) -> Result<Workspace, DbErr> {
        let entity = entity::workspace::ActiveModel {
            name: ActiveValue::Set(param.name),
            slug: ActiveValue::Set(param.slug),
            description: ActiveValue::Set(param.description),
            plan: ActiveValue::Set(DEFAULT_PLAN.to_string()),
            settings: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Workspace::from_entity(entity))
    }

    pub async fn find_by_id(&self, workspace_id: i32) -> Result<Option<Workspace>, DbErr> {
        let entity = entity::prelude::Workspace::find_by_id(workspace_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Workspace::from_entity))
    }

    pub async fn find_by_ids(&self, workspace_ids: &[i32]) -> Result<Vec<Workspace>, DbErr> {
        let entities = entity::prelude::Workspace::find()
            .filter(entity::workspace::Column::Id.is_in(workspace_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Workspace::from_entity).collect())
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Workspace::find()
            .filter(entity::workspace::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Workspace))` - The updated workspace
    /// - `Ok(None)` - No workspace with that ID
    pub async fn update(
        &self,
        workspace_id: i32,
        param: UpdateWorkspaceParam,
    ) -> Result<Option<Workspace>, DbErr> {
        let Some(entity) = entity::prelude::Workspace::find_by_id(workspace_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(settings) = param.settings {
            active.settings = ActiveValue::Set(Some(settings));
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Workspace::from_entity(updated)))
    }

    /// Deletes a workspace with its memberships, invitations and team goals.
    pub async fn delete(&self, workspace_id: i32) -> Result<bool, DbErr> {
        use sea_orm::TransactionTrait;

        let txn = self.db.begin().await?;

        let goal_ids: Vec<i32> = entity::prelude::TeamGoal::find()
            .filter(entity::team_goal::Column::WorkspaceId.eq(workspace_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();

        entity::prelude::TeamGoalStep::delete_many()
            .filter(entity::team_goal_step::Column::TeamGoalId.is_in(goal_ids.clone()))
            .exec(&txn)
            .await?;
        entity::prelude::TeamGoalContributor::delete_many()
            .filter(entity::team_goal_contributor::Column::TeamGoalId.is_in(goal_ids))
            .exec(&txn)
            .await?;
        entity::prelude::TeamGoal::delete_many()
            .filter(entity::team_goal::Column::WorkspaceId.eq(workspace_id))
            .exec(&txn)
            .await?;
        entity::prelude::WorkspaceInvite::delete_many()
            .filter(entity::workspace_invite::Column::WorkspaceId.eq(workspace_id))
            .exec(&txn)
            .await?;
        entity::prelude::WorkspaceMember::delete_many()
            .filter(entity::workspace_member::Column::WorkspaceId.eq(workspace_id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Workspace::delete_by_id(workspace_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
