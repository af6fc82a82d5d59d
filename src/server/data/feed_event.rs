//! Feed event repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::Value;

use crate::server::model::feed::FeedEvent;

pub struct FeedEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeedEventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, user_id: i32, kind: &str, data: Value) -> Result<FeedEvent, DbErr> {
        let entity = entity::feed_event::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            kind: ActiveValue::Set(kind.to_string()),
            data: ActiveValue::Set(data),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(FeedEvent::from_entity(entity))
    }

    /// Gets events of the given users, newest first, one page at a time.
    ///
    /// # Arguments
    /// - `user_ids` - Authors whose events are included
    /// - `page` - Zero-based page index
    /// - `page_size` - Events per page
    pub async fn get_for_users(
        &self,
        user_ids: &[i32],
        page: u64,
        page_size: u64,
    ) -> Result<Vec<FeedEvent>, DbErr> {
        let entities = entity::prelude::FeedEvent::find()
            .filter(entity::feed_event::Column::UserId.is_in(user_ids.iter().copied()))
            .order_by_desc(entity::feed_event::Column::CreatedAt)
            .order_by_desc(entity::feed_event::Column::Id)
            .offset(page * page_size)
            .limit(page_size)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(FeedEvent::from_entity).collect())
    }
}
