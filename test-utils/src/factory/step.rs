//! Step factory for creating test progress steps.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test steps with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let step = StepFactory::new(&db, goal.id)
///     .value(3.0)
///     .created_at(morning)
///     .build()
///     .await?;
/// ```
pub struct StepFactory<'a> {
    db: &'a DatabaseConnection,
    goal_id: i32,
    value: Option<f64>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'a> StepFactory<'a> {
    /// Creates a new StepFactory with value `1.0`, no note, logged now.
    pub fn new(db: &'a DatabaseConnection, goal_id: i32) -> Self {
        Self {
            db,
            goal_id,
            value: Some(1.0),
            note: None,
            created_at: Utc::now(),
        }
    }

    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn no_value(mut self) -> Self {
        self.value = None;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the step entity into the database.
    pub async fn build(self) -> Result<entity::step::Model, DbErr> {
        entity::step::ActiveModel {
            goal_id: ActiveValue::Set(self.goal_id),
            value: ActiveValue::Set(self.value),
            note: ActiveValue::Set(self.note),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a step with default values on the given goal.
pub async fn create_step(
    db: &DatabaseConnection,
    goal_id: i32,
) -> Result<entity::step::Model, DbErr> {
    StepFactory::new(db, goal_id).build().await
}

/// Creates a step logged at a specific instant.
pub async fn create_step_at(
    db: &DatabaseConnection,
    goal_id: i32,
    created_at: DateTime<Utc>,
) -> Result<entity::step::Model, DbErr> {
    StepFactory::new(db, goal_id).created_at(created_at).build().await
}
