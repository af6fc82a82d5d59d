//! Friendship data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::friend::{Friendship, STATUS_ACCEPTED, STATUS_PENDING};

pub struct FriendshipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FriendshipRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending request unless the two users already share a friendship row in
    /// either direction.
    ///
    /// The check and the insert run in one transaction; the unique index on the unordered
    /// pair rejects whatever still slips through.
    ///
    /// # Returns
    /// - `Ok(Some(Friendship))` - The new pending request
    /// - `Ok(None)` - A request or friendship between the two users already exists
    /// - `Err(DbErr)` - Database error, including a unique violation on the pair
    pub async fn create_request(
        &self,
        requester_id: i32,
        addressee_id: i32,
    ) -> Result<Option<Friendship>, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::Friendship::find()
            .filter(between(requester_id, addressee_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Ok(None);
        }

        let entity = entity::friendship::ActiveModel {
            requester_id: ActiveValue::Set(requester_id),
            addressee_id: ActiveValue::Set(addressee_id),
            status: ActiveValue::Set(STATUS_PENDING.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(Some(Friendship::from_entity(entity)))
    }

    pub async fn find_by_id(&self, friendship_id: i32) -> Result<Option<Friendship>, DbErr> {
        let entity = entity::prelude::Friendship::find_by_id(friendship_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Friendship::from_entity))
    }

    /// Finds any friendship row between two users regardless of direction.
    pub async fn find_between(&self, a: i32, b: i32) -> Result<Option<Friendship>, DbErr> {
        let entity = entity::prelude::Friendship::find()
            .filter(between(a, b))
            .one(self.db)
            .await?;

        Ok(entity.map(Friendship::from_entity))
    }

    /// Marks a friendship as accepted.
    ///
    /// # Returns
    /// - `Ok(Some(Friendship))` - The accepted friendship
    /// - `Ok(None)` - No friendship with that ID
    pub async fn accept(&self, friendship_id: i32) -> Result<Option<Friendship>, DbErr> {
        let Some(entity) = entity::prelude::Friendship::find_by_id(friendship_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.status = ActiveValue::Set(STATUS_ACCEPTED.to_string());
        let updated = active.update(self.db).await?;

        Ok(Some(Friendship::from_entity(updated)))
    }

    pub async fn delete(&self, friendship_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Friendship::delete_by_id(friendship_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets the friendship rows involving a user, optionally filtered by status.
    ///
    /// # Arguments
    /// - `user_id` - User on either side of the friendship
    /// - `status` - `Some("accepted")`, `Some("pending")` or `None` for any status
    pub async fn get_for_user(
        &self,
        user_id: i32,
        status: Option<&str>,
    ) -> Result<Vec<Friendship>, DbErr> {
        let mut query = entity::prelude::Friendship::find().filter(
            Condition::any()
                .add(entity::friendship::Column::RequesterId.eq(user_id))
                .add(entity::friendship::Column::AddresseeId.eq(user_id)),
        );
        if let Some(status) = status {
            query = query.filter(entity::friendship::Column::Status.eq(status));
        }

        let entities = query
            .order_by_desc(entity::friendship::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Friendship::from_entity).collect())
    }

    /// IDs of users with an accepted friendship with `user_id`.
    pub async fn get_friend_ids(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        let friendships = self.get_for_user(user_id, Some(STATUS_ACCEPTED)).await?;

        Ok(friendships
            .iter()
            .map(|f| f.other_party(user_id))
            .collect())
    }
}

/// Matches the row of the pair `(a, b)` in either direction.
fn between(a: i32, b: i32) -> Condition {
    Condition::any()
        .add(
            Condition::all()
                .add(entity::friendship::Column::RequesterId.eq(a))
                .add(entity::friendship::Column::AddresseeId.eq(b)),
        )
        .add(
            Condition::all()
                .add(entity::friendship::Column::RequesterId.eq(b))
                .add(entity::friendship::Column::AddresseeId.eq(a)),
        )
}
