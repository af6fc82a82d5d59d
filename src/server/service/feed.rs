use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    data::{feed_event::FeedEventRepository, friendship::FriendshipRepository},
    error::AppError,
    model::feed::FeedEvent,
};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

pub struct FeedService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeedService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn add_event(&self, user_id: i32, kind: &str, data: Value) -> Result<FeedEvent, AppError> {
        let event = FeedEventRepository::new(self.db)
            .create(user_id, kind, data)
            .await?;

        Ok(event)
    }

    /// Adds a feed event, logging instead of failing when the insert errors.
    ///
    /// Used for side effects of other operations, which must not fail because the
    /// feed could not be written.
    pub async fn add_event_logged(&self, user_id: i32, kind: &str, data: Value) {
        if let Err(e) = self.add_event(user_id, kind, data).await {
            tracing::error!("Failed to add {} feed event for user {}: {}", kind, user_id, e);
        }
    }

    /// Gets the user's feed, newest first.
    ///
    /// # Arguments
    /// - `user_id` - Feed owner, whose own events are always included
    /// - `include_friends` - Also include events of accepted friends
    /// - `page` - Zero-based page
    /// - `page_size` - Events per page, at most 100
    pub async fn get_feed(
        &self,
        user_id: i32,
        include_friends: bool,
        page: u64,
        page_size: u64,
    ) -> Result<Vec<FeedEvent>, AppError> {
        let mut authors = vec![user_id];
        if include_friends {
            authors.extend(
                FriendshipRepository::new(self.db)
                    .get_friend_ids(user_id)
                    .await?,
            );
        }

        let events = FeedEventRepository::new(self.db)
            .get_for_users(&authors, page, page_size.clamp(1, MAX_PAGE_SIZE))
            .await?;

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::feed::GOAL_CREATED;
    use serde_json::json;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests that friends' events only appear when requested.
    ///
    /// Expected: one event without friends, two with friends, never the stranger's
    #[tokio::test]
    async fn includes_friends_only_when_asked() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_social_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let me = factory::create_user(db).await?;
        let friend = factory::create_user(db).await?;
        let stranger = factory::create_user(db).await?;
        factory::create_accepted_friendship(db, friend.id, me.id).await?;

        let service = FeedService::new(db);
        service.add_event(me.id, GOAL_CREATED, json!({ "goal_id": 1 })).await?;
        service.add_event(friend.id, GOAL_CREATED, json!({ "goal_id": 2 })).await?;
        service.add_event(stranger.id, GOAL_CREATED, json!({ "goal_id": 3 })).await?;

        let own = service.get_feed(me.id, false, 0, DEFAULT_PAGE_SIZE).await?;
        assert_eq!(own.len(), 1);

        let with_friends = service.get_feed(me.id, true, 0, DEFAULT_PAGE_SIZE).await?;
        assert_eq!(with_friends.len(), 2);
        assert!(with_friends.iter().all(|e| e.user_id != stranger.id));

        Ok(())
    }
}
