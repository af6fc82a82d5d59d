//! Subtask factory for creating test checklist items.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an open subtask titled `"Subtask {id}"` on the given goal.
pub async fn create_subtask(
    db: &DatabaseConnection,
    goal_id: i32,
) -> Result<entity::subtask::Model, DbErr> {
    create_subtask_with_state(db, goal_id, false).await
}

/// Creates a subtask with an explicit completion state.
pub async fn create_subtask_with_state(
    db: &DatabaseConnection,
    goal_id: i32,
    completed: bool,
) -> Result<entity::subtask::Model, DbErr> {
    entity::subtask::ActiveModel {
        goal_id: ActiveValue::Set(goal_id),
        title: ActiveValue::Set(format!("Subtask {}", next_id())),
        completed: ActiveValue::Set(completed),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
