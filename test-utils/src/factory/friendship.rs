//! Friendship factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a friendship row between two users with the given status.
///
/// # Arguments
/// - `db` - Database connection
/// - `requester_id` - User who sent the request
/// - `addressee_id` - User who received it
/// - `status` - `"pending"` or `"accepted"`
pub async fn create_friendship(
    db: &DatabaseConnection,
    requester_id: i32,
    addressee_id: i32,
    status: &str,
) -> Result<entity::friendship::Model, DbErr> {
    entity::friendship::ActiveModel {
        requester_id: ActiveValue::Set(requester_id),
        addressee_id: ActiveValue::Set(addressee_id),
        status: ActiveValue::Set(status.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an accepted friendship.
pub async fn create_accepted_friendship(
    db: &DatabaseConnection,
    requester_id: i32,
    addressee_id: i32,
) -> Result<entity::friendship::Model, DbErr> {
    create_friendship(db, requester_id, addressee_id, "accepted").await
}
