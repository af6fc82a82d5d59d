//! Achievement factory for creating catalogue rows and grants.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::Value;

/// Factory for creating achievement definitions.
///
/// # Example
///
/// ```rust,ignore
/// let achievement = AchievementFactory::new(&db)
///     .code("streak_3")
///     .kind("streak")
///     .requirement(json!({ "days": 3 }))
///     .build()
///     .await?;
/// ```
pub struct AchievementFactory<'a> {
    db: &'a DatabaseConnection,
    code: String,
    title: String,
    kind: String,
    requirement: Option<Value>,
}

impl<'a> AchievementFactory<'a> {
    /// Creates a new AchievementFactory.
    ///
    /// Defaults to a `goal_count` rule requiring one goal, with code `"achievement_{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            code: format!("achievement_{}", id),
            title: format!("Achievement {}", id),
            kind: "goal_count".to_string(),
            requirement: Some(serde_json::json!({ "count": 1 })),
        }
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn requirement(mut self, requirement: Value) -> Self {
        self.requirement = Some(requirement);
        self
    }

    pub fn no_requirement(mut self) -> Self {
        self.requirement = None;
        self
    }

    /// Builds and inserts the achievement entity into the database.
    pub async fn build(self) -> Result<entity::achievement::Model, DbErr> {
        entity::achievement::ActiveModel {
            code: ActiveValue::Set(self.code),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set("Test achievement".to_string()),
            icon: ActiveValue::Set(Some("🏅".to_string())),
            kind: ActiveValue::Set(self.kind),
            requirement: ActiveValue::Set(self.requirement),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an achievement with the given rule type and requirement.
pub async fn create_achievement(
    db: &DatabaseConnection,
    kind: &str,
    requirement: Value,
) -> Result<entity::achievement::Model, DbErr> {
    AchievementFactory::new(db)
        .kind(kind)
        .requirement(requirement)
        .build()
        .await
}

/// Grants an achievement to a user now.
pub async fn grant_achievement(
    db: &DatabaseConnection,
    user_id: i32,
    achievement_id: i32,
) -> Result<entity::achievement_on_user::Model, DbErr> {
    entity::achievement_on_user::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        achievement_id: ActiveValue::Set(achievement_id),
        achieved_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
