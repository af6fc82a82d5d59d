//! Analytics event factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating analytics events.
///
/// # Example
///
/// ```rust,ignore
/// let event = EventFactory::new(&db, user.id, "create_step")
///     .sphere("health")
///     .occurred_at(yesterday)
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    event_type: String,
    occurred_at: DateTime<Utc>,
    sphere: Option<String>,
    goal_id: Option<i32>,
    client_event_id: Option<String>,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory occurring now with no sphere or goal.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, event_type: impl Into<String>) -> Self {
        Self {
            db,
            user_id,
            event_type: event_type.into(),
            occurred_at: Utc::now(),
            sphere: None,
            goal_id: None,
            client_event_id: None,
        }
    }

    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    pub fn sphere(mut self, sphere: impl Into<String>) -> Self {
        self.sphere = Some(sphere.into());
        self
    }

    pub fn goal_id(mut self, goal_id: i32) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    pub fn client_event_id(mut self, client_event_id: impl Into<String>) -> Self {
        self.client_event_id = Some(client_event_id.into());
        self
    }

    /// Builds and inserts the event entity into the database.
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            event_type: ActiveValue::Set(self.event_type),
            occurred_at: ActiveValue::Set(self.occurred_at),
            payload: ActiveValue::Set(None),
            client_event_id: ActiveValue::Set(self.client_event_id),
            source: ActiveValue::Set(Some("web".to_string())),
            sphere: ActiveValue::Set(self.sphere),
            goal_id: ActiveValue::Set(self.goal_id),
            step_id: ActiveValue::Set(None),
            subtask_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
