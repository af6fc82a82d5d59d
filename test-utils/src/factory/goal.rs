//! Goal factory for creating test goal entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test goals with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let goal = GoalFactory::new(&db, user.id)
///     .sphere("health")
///     .target_value(10.0)
///     .completed_at(Utc::now())
///     .build()
///     .await?;
/// ```
pub struct GoalFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    title: String,
    description: Option<String>,
    sphere: Option<String>,
    privacy: String,
    progress_type: String,
    target_value: Option<f64>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<'a> GoalFactory<'a> {
    /// Creates a new GoalFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Goal {id}"`
    /// - privacy: `"private"`, progress_type: `"quantity"`
    /// - no sphere, target, or completion
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            title: format!("Goal {}", id),
            description: None,
            sphere: None,
            privacy: "private".to_string(),
            progress_type: "quantity".to_string(),
            target_value: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn sphere(mut self, sphere: impl Into<String>) -> Self {
        self.sphere = Some(sphere.into());
        self
    }

    pub fn privacy(mut self, privacy: impl Into<String>) -> Self {
        self.privacy = privacy.into();
        self
    }

    pub fn target_value(mut self, target_value: f64) -> Self {
        self.target_value = Some(target_value);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Builds and inserts the goal entity into the database.
    pub async fn build(self) -> Result<entity::goal::Model, DbErr> {
        entity::goal::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            sphere: ActiveValue::Set(self.sphere),
            privacy: ActiveValue::Set(self.privacy),
            progress_type: ActiveValue::Set(self.progress_type),
            target_value: ActiveValue::Set(self.target_value),
            created_at: ActiveValue::Set(self.created_at),
            completed_at: ActiveValue::Set(self.completed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a goal with default values for the given user.
pub async fn create_goal(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::goal::Model, DbErr> {
    GoalFactory::new(db, user_id).build().await
}

/// Creates a goal completed now for the given user.
pub async fn create_completed_goal(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::goal::Model, DbErr> {
    GoalFactory::new(db, user_id)
        .completed_at(Utc::now())
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::TestBuilder, factory::user::create_user};

    #[tokio::test]
    async fn creates_goal_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_goal_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        let goal = create_goal(db, user.id).await?;

        assert_eq!(goal.user_id, user.id);
        assert_eq!(goal.privacy, "private");
        assert_eq!(goal.progress_type, "quantity");
        assert!(goal.completed_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_completed_goal() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_goal_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;
        let goal = create_completed_goal(db, user.id).await?;

        assert!(goal.completed_at.is_some());

        Ok(())
    }
}
