//! Goal data repository.
//!
//! Provides the `GoalRepository` for personal goals. Deleting a goal removes its steps
//! and subtasks in the same transaction.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::goal::{CreateGoalParam, Goal, UpdateGoalParam};

pub struct GoalRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GoalRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a goal.
    ///
    /// # Arguments
    /// - `param` - Validated goal fields
    ///
    /// # Returns
    /// - `Ok(Goal)` - The created goal
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateGoalParam) -> Result<Goal, DbErr> {
        let entity = entity::goal::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            sphere: ActiveValue::Set(param.sphere),
            privacy: ActiveValue::Set(param.privacy),
            progress_type: ActiveValue::Set(param.progress_type),
            target_value: ActiveValue::Set(param.target_value),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Goal::from_entity(entity))
    }

    pub async fn find_by_id(&self, goal_id: i32) -> Result<Option<Goal>, DbErr> {
        let entity = entity::prelude::Goal::find_by_id(goal_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Goal::from_entity))
    }

    /// Gets all goals of a user, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Goal>, DbErr> {
        let entities = entity::prelude::Goal::find()
            .filter(entity::goal::Column::UserId.eq(user_id))
            .order_by_desc(entity::goal::Column::CreatedAt)
            .order_by_desc(entity::goal::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Goal::from_entity).collect())
    }

    /// Counts goals of a user completed at or after `since`.
    pub async fn count_completed_since(
        &self,
        user_id: i32,
        since: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::Goal::find()
            .filter(entity::goal::Column::UserId.eq(user_id))
            .filter(entity::goal::Column::CompletedAt.gte(since))
            .count(self.db)
            .await
    }

    /// Applies a partial update to an existing goal.
    ///
    /// # Returns
    /// - `Ok(Some(Goal))` - The updated goal
    /// - `Ok(None)` - No goal with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, goal_id: i32, param: UpdateGoalParam) -> Result<Option<Goal>, DbErr> {
        let Some(entity) = entity::prelude::Goal::find_by_id(goal_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(title) = param.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(sphere) = param.sphere {
            active.sphere = ActiveValue::Set(Some(sphere));
        }
        if let Some(privacy) = param.privacy {
            active.privacy = ActiveValue::Set(privacy);
        }
        if let Some(progress_type) = param.progress_type {
            active.progress_type = ActiveValue::Set(progress_type);
        }
        if let Some(target_value) = param.target_value {
            active.target_value = ActiveValue::Set(Some(target_value));
        }
        if let Some(completed_at) = param.completed_at {
            active.completed_at = ActiveValue::Set(completed_at);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Goal::from_entity(updated)))
    }

    /// Deletes a goal together with its steps and subtasks.
    ///
    /// # Returns
    /// - `Ok(true)` - Goal deleted
    /// - `Ok(false)` - No goal with that ID
    /// - `Err(DbErr)` - Database error, the transaction is rolled back
    pub async fn delete(&self, goal_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::Step::delete_many()
            .filter(entity::step::Column::GoalId.eq(goal_id))
            .exec(&txn)
            .await?;
        entity::prelude::Subtask::delete_many()
            .filter(entity::subtask::Column::GoalId.eq(goal_id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Goal::delete_by_id(goal_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
