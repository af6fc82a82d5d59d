//! Shared helper utilities for factory methods.
//!
//! Provides the ID counter used by every factory plus convenience methods for creating
//! entities together with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user owning one goal with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((user, goal))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_goal_with_owner(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::goal::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let goal = crate::factory::goal::create_goal(db, user.id).await?;

    Ok((user, goal))
}

/// Creates a workspace whose owner membership belongs to a fresh user.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((owner, workspace, membership))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_workspace_with_owner(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::workspace::Model,
        entity::workspace_member::Model,
    ),
    DbErr,
> {
    let owner = crate::factory::user::create_user(db).await?;
    let workspace = crate::factory::workspace::create_workspace(db).await?;
    let membership =
        crate::factory::workspace::create_member(db, workspace.id, owner.id, "owner").await?;

    Ok((owner, workspace, membership))
}
