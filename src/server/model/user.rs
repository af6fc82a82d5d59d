//! User domain models and parameters.
//!
//! Provides the application user with credentials, profile fields and streak tracking,
//! together with the parameter types used for registration and profile updates.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::user::{ProfileDto, PublicProfileDto, UserSummaryDto};

/// Registered user with profile and activity streak.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Unique login email.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    /// Consecutive UTC days with at least one logged step.
    pub current_streak: i32,
    pub longest_streak: i32,
    /// UTC day of the most recent logged step.
    pub last_active_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            name: entity.name,
            avatar_url: entity.avatar_url,
            bio: entity.bio,
            current_streak: entity.current_streak,
            longest_streak: entity.longest_streak,
            last_active_date: entity.last_active_date,
            created_at: entity.created_at,
        }
    }

    /// Converts into the caller's own profile, including the email.
    pub fn into_profile_dto(self) -> ProfileDto {
        ProfileDto {
            id: self.id,
            email: self.email,
            name: self.name,
            avatar_url: self.avatar_url,
            bio: self.bio,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            created_at: self.created_at,
        }
    }

    pub fn into_public_dto(self) -> PublicProfileDto {
        PublicProfileDto {
            id: self.id,
            name: self.name,
            avatar_url: self.avatar_url,
            bio: self.bio,
        }
    }

    pub fn to_summary_dto(&self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// Parameters for inserting a freshly registered user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Profile fields to change; `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// New streak values computed after a step was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_active_date: NaiveDate,
}
