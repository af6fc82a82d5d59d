use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The caller's own profile, including private fields.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ProfileDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// Profile visible to any authenticated user.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct PublicProfileDto {
    pub id: i32,
    pub name: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserSummaryDto {
    pub id: i32,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AvatarDto {
    pub avatar_url: String,
}

/// Multipart form for avatar uploads, described for the API document.
#[derive(Deserialize, ToSchema)]
pub struct AvatarUploadDto {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
