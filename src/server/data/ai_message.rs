//! Stored AI insight message repository.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::ai::{AiMessage, NewAiMessage};

/// Dismissed messages are kept this long before being purged.
pub const DISMISSED_RETENTION_DAYS: i64 = 7;

pub struct AiMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AiMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores new messages created at `now`.
    pub async fn create_many(&self, messages: Vec<NewAiMessage>, now: DateTime<Utc>) -> Result<(), DbErr> {
        for message in messages {
            entity::ai_message::ActiveModel {
                user_id: ActiveValue::Set(message.user_id),
                kind: ActiveValue::Set(message.kind),
                priority: ActiveValue::Set(message.priority),
                message: ActiveValue::Set(message.message),
                emoji: ActiveValue::Set(message.emoji),
                metadata: ActiveValue::Set(message.metadata),
                shown: ActiveValue::Set(false),
                dismissed: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                expires_at: ActiveValue::Set(message.expires_at),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Creation time of the user's newest message, if any.
    pub async fn last_created_at(&self, user_id: i32) -> Result<Option<DateTime<Utc>>, DbErr> {
        let entity = entity::prelude::AiMessage::find()
            .filter(entity::ai_message::Column::UserId.eq(user_id))
            .order_by_desc(entity::ai_message::Column::CreatedAt)
            .one(self.db)
            .await?;

        Ok(entity.map(|m| m.created_at))
    }

    /// Gets messages to show: not shown, not dismissed and unexpired, highest
    /// priority and newest first.
    pub async fn get_active(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<AiMessage>, DbErr> {
        let entities = entity::prelude::AiMessage::find()
            .filter(entity::ai_message::Column::UserId.eq(user_id))
            .filter(entity::ai_message::Column::Shown.eq(false))
            .filter(entity::ai_message::Column::Dismissed.eq(false))
            .filter(
                Condition::any()
                    .add(entity::ai_message::Column::ExpiresAt.is_null())
                    .add(entity::ai_message::Column::ExpiresAt.gt(now)),
            )
            .order_by_desc(entity::ai_message::Column::Priority)
            .order_by_desc(entity::ai_message::Column::CreatedAt)
            .order_by_desc(entity::ai_message::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(AiMessage::from_entity).collect())
    }

    /// Gets `(kind, message)` of every undismissed message of a user.
    pub async fn get_undismissed_texts(&self, user_id: i32) -> Result<Vec<(String, String)>, DbErr> {
        entity::prelude::AiMessage::find()
            .select_only()
            .column(entity::ai_message::Column::Kind)
            .column(entity::ai_message::Column::Message)
            .filter(entity::ai_message::Column::UserId.eq(user_id))
            .filter(entity::ai_message::Column::Dismissed.eq(false))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Deletes expired messages of any user and the week-old dismissed messages of
    /// `user_id`, or of every user when `user_id` is `None`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted messages
    /// - `Err(DbErr)` - Database error during delete
    pub async fn purge(&self, user_id: Option<i32>, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let mut stale_dismissed = Condition::all()
            .add(entity::ai_message::Column::Dismissed.eq(true))
            .add(
                entity::ai_message::Column::CreatedAt
                    .lt(now - Duration::days(DISMISSED_RETENTION_DAYS)),
            );
        if let Some(user_id) = user_id {
            stale_dismissed = stale_dismissed.add(entity::ai_message::Column::UserId.eq(user_id));
        }

        let result = entity::prelude::AiMessage::delete_many()
            .filter(
                Condition::any()
                    .add(stale_dismissed)
                    .add(entity::ai_message::Column::ExpiresAt.lt(now)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets `dismissed` on one of the user's messages. Messages of other users are
    /// never touched.
    ///
    /// # Returns
    /// - `Ok(true)` - A message was updated
    /// - `Ok(false)` - No message with that ID belongs to the user
    pub async fn dismiss(&self, user_id: i32, message_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::AiMessage::update_many()
            .col_expr(
                entity::ai_message::Column::Dismissed,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(entity::ai_message::Column::Id.eq(message_id))
            .filter(entity::ai_message::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sets `shown` on one of the user's messages.
    pub async fn mark_shown(&self, user_id: i32, message_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::AiMessage::update_many()
            .col_expr(
                entity::ai_message::Column::Shown,
                sea_orm::sea_query::Expr::value(true),
            )
            .filter(entity::ai_message::Column::Id.eq(message_id))
            .filter(entity::ai_message::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
