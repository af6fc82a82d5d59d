//! Stored insight message factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating stored AI messages.
///
/// # Example
///
/// ```rust,ignore
/// let message = AiMessageFactory::new(&db, user.id)
///     .kind("motivation")
///     .dismissed(true)
///     .created_at(two_weeks_ago)
///     .build()
///     .await?;
/// ```
pub struct AiMessageFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    kind: String,
    priority: i32,
    message: String,
    shown: bool,
    dismissed: bool,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl<'a> AiMessageFactory<'a> {
    /// Creates a new unshown, undismissed `insight` message with priority 3.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            kind: "insight".to_string(),
            priority: 3,
            message: "Keep going, you are doing great".to_string(),
            shown: false,
            dismissed: false,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn shown(mut self, shown: bool) -> Self {
        self.shown = shown;
        self
    }

    pub fn dismissed(mut self, dismissed: bool) -> Self {
        self.dismissed = dismissed;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Builds and inserts the message entity into the database.
    pub async fn build(self) -> Result<entity::ai_message::Model, DbErr> {
        entity::ai_message::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            kind: ActiveValue::Set(self.kind),
            priority: ActiveValue::Set(self.priority),
            message: ActiveValue::Set(self.message),
            emoji: ActiveValue::Set("✨".to_string()),
            metadata: ActiveValue::Set(None),
            shown: ActiveValue::Set(self.shown),
            dismissed: ActiveValue::Set(self.dismissed),
            created_at: ActiveValue::Set(self.created_at),
            expires_at: ActiveValue::Set(self.expires_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
