//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records in the database.
//! It handles registration inserts, profile and streak updates, lookups and search with
//! conversion between entity models and domain models at the infrastructure boundary.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateUserParam, StreakUpdate, UpdateProfileParam, User};

/// Repository providing database operations for user management.
///
/// This struct holds a reference to the database connection and provides methods
/// for creating, reading, updating, and searching user records.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a newly registered user with empty streaks.
    ///
    /// # Arguments
    /// - `param` - Email, display name and password hash
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on email
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(param.email),
            password_hash: ActiveValue::Set(param.password_hash),
            name: ActiveValue::Set(param.name),
            avatar_url: ActiveValue::Set(None),
            bio: ActiveValue::Set(None),
            current_streak: ActiveValue::Set(0),
            longest_streak: ActiveValue::Set(0),
            last_active_date: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by exact email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Loads several users at once, keyed by ID.
    ///
    /// Missing IDs are simply absent from the returned map.
    ///
    /// # Arguments
    /// - `user_ids` - IDs to load, duplicates allowed
    ///
    /// # Returns
    /// - `Ok(HashMap<i32, User>)` - Found users keyed by ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_ids(&self, user_ids: &[i32]) -> Result<HashMap<i32, User>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(users
            .into_iter()
            .map(|u| (u.id, User::from_entity(u)))
            .collect())
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(bio) = param.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }

        let updated = active.update(self.db).await?;
        Ok(Some(User::from_entity(updated)))
    }

    /// Stores the public URL of the user's avatar.
    pub async fn set_avatar_url(&self, user_id: i32, avatar_url: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::AvatarUrl,
                sea_orm::sea_query::Expr::value(avatar_url),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Writes new streak values for a user.
    pub async fn update_streak(&self, user_id: i32, streak: StreakUpdate) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::CurrentStreak,
                sea_orm::sea_query::Expr::value(streak.current_streak),
            )
            .col_expr(
                entity::user::Column::LongestStreak,
                sea_orm::sea_query::Expr::value(streak.longest_streak),
            )
            .col_expr(
                entity::user::Column::LastActiveDate,
                sea_orm::sea_query::Expr::value(streak.last_active_date),
            )
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Resets `current_streak` to 0 for users not active since `before`.
    ///
    /// Users with no recorded activity date are reset too.
    ///
    /// # Arguments
    /// - `before` - First UTC day that still keeps a streak alive
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of users whose streak was reset
    /// - `Err(DbErr)` - Database error during update
    pub async fn reset_stale_streaks(&self, before: NaiveDate) -> Result<u64, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(
                entity::user::Column::CurrentStreak,
                sea_orm::sea_query::Expr::value(0),
            )
            .filter(entity::user::Column::CurrentStreak.gt(0))
            .filter(
                Condition::any()
                    .add(entity::user::Column::LastActiveDate.lt(before))
                    .add(entity::user::Column::LastActiveDate.is_null()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Searches users whose name or email contains `query`, ignoring case.
    ///
    /// SQLite `LIKE` only folds ASCII, so names are compared after Unicode lowercasing in
    /// Rust. Results are ordered by name.
    ///
    /// # Arguments
    /// - `query` - Substring to look for
    /// - `exclude` - User IDs never returned
    /// - `limit` - Maximum number of results
    pub async fn search(
        &self,
        query: &str,
        exclude: &[i32],
        limit: u64,
    ) -> Result<Vec<User>, DbErr> {
        let needle = query.to_lowercase();

        let users = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_not_in(exclude.iter().copied()))
            .order_by_asc(entity::user::Column::Name)
            .all(self.db)
            .await?;

        Ok(users
            .into_iter()
            .filter(|user| {
                user.name.to_lowercase().contains(&needle)
                    || user.email.to_lowercase().contains(&needle)
            })
            .take(limit as usize)
            .map(User::from_entity)
            .collect())
    }
}
