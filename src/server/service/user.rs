use sea_orm::DatabaseConnection;

use crate::server::{
    data::{friendship::FriendshipRepository, user::UserRepository},
    error::AppError,
    model::user::{UpdateProfileParam, User},
    service::moderation::ModerationService,
};

/// Minimum query length before a user search hits the database.
const MIN_SEARCH_LEN: usize = 2;
/// Maximum users returned by one search.
const SEARCH_LIMIT: u64 = 20;

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Updates the caller's name and/or bio after moderating both.
    pub async fn update_profile(
        &self,
        moderation: &ModerationService,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<User, AppError> {
        moderation.check("name", param.name.as_deref())?;
        moderation.check("bio", param.bio.as_deref())?;

        if matches!(&param.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }

        UserRepository::new(self.db)
            .update_profile(user_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Public profile of any user.
    pub async fn get_public(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Finds users the caller could send a friend request to.
    ///
    /// Queries shorter than two characters return nothing. The caller and everyone
    /// sharing a friendship row with the caller, pending or accepted, are excluded.
    pub async fn search(&self, caller_id: i32, query: &str) -> Result<Vec<User>, AppError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }

        let friendships = FriendshipRepository::new(self.db)
            .get_for_user(caller_id, None)
            .await?;

        let mut excluded: Vec<i32> = friendships
            .iter()
            .map(|f| f.other_party(caller_id))
            .collect();
        excluded.push(caller_id);

        let users = UserRepository::new(self.db)
            .search(query, &excluded, SEARCH_LIMIT)
            .await?;

        Ok(users)
    }
}
