//! Subtask data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::goal::Subtask;

pub struct SubtaskRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubtaskRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, goal_id: i32, title: String, completed: bool) -> Result<Subtask, DbErr> {
        let entity = entity::subtask::ActiveModel {
            goal_id: ActiveValue::Set(goal_id),
            title: ActiveValue::Set(title),
            completed: ActiveValue::Set(completed),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Subtask::from_entity(entity))
    }

    pub async fn find_by_id(&self, subtask_id: i32) -> Result<Option<Subtask>, DbErr> {
        let entity = entity::prelude::Subtask::find_by_id(subtask_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Subtask::from_entity))
    }

    /// Gets the subtasks of a goal in creation order.
    pub async fn get_by_goal(&self, goal_id: i32) -> Result<Vec<Subtask>, DbErr> {
        let entities = entity::prelude::Subtask::find()
            .filter(entity::subtask::Column::GoalId.eq(goal_id))
            .order_by_asc(entity::subtask::Column::CreatedAt)
            .order_by_asc(entity::subtask::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Subtask::from_entity).collect())
    }

    /// Updates title and/or completion of a subtask.
    ///
    /// # Returns
    /// - `Ok(Some(Subtask))` - The updated subtask
    /// - `Ok(None)` - No subtask with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        subtask_id: i32,
        title: Option<String>,
        completed: Option<bool>,
    ) -> Result<Option<Subtask>, DbErr> {
        let Some(entity) = entity::prelude::Subtask::find_by_id(subtask_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(title) = title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(completed) = completed {
            active.completed = ActiveValue::Set(completed);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(Subtask::from_entity(updated)))
    }

    pub async fn delete(&self, subtask_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Subtask::delete_by_id(subtask_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
