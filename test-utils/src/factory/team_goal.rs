//! Team goal factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating team goals.
///
/// # Example
///
/// ```rust,ignore
/// let goal = TeamGoalFactory::new(&db, workspace.id, owner.id)
///     .target_value(10)
///     .category("sales")
///     .build()
///     .await?;
/// ```
pub struct TeamGoalFactory<'a> {
    db: &'a DatabaseConnection,
    workspace_id: i32,
    owner_id: i32,
    title: String,
    target_value: i32,
    category: Option<String>,
    status: String,
}

impl<'a> TeamGoalFactory<'a> {
    /// Creates a new active TeamGoalFactory targeting 100.
    pub fn new(db: &'a DatabaseConnection, workspace_id: i32, owner_id: i32) -> Self {
        Self {
            db,
            workspace_id,
            owner_id,
            title: format!("Team Goal {}", next_id()),
            target_value: 100,
            category: None,
            status: "active".to_string(),
        }
    }

    pub fn target_value(mut self, target_value: i32) -> Self {
        self.target_value = target_value;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the team goal entity into the database.
    pub async fn build(self) -> Result<entity::team_goal::Model, DbErr> {
        let completed_at = (self.status == "completed").then(Utc::now);

        entity::team_goal::ActiveModel {
            workspace_id: ActiveValue::Set(self.workspace_id),
            owner_id: ActiveValue::Set(self.owner_id),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            target_value: ActiveValue::Set(self.target_value),
            category: ActiveValue::Set(self.category),
            visibility: ActiveValue::Set("workspace".to_string()),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(completed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active team goal targeting 100.
pub async fn create_team_goal(
    db: &DatabaseConnection,
    workspace_id: i32,
    owner_id: i32,
) -> Result<entity::team_goal::Model, DbErr> {
    TeamGoalFactory::new(db, workspace_id, owner_id).build().await
}
