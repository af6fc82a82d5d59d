use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateGroupDto {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct GroupDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct GroupMembershipDto {
    pub id: i32,
    pub group_id: i32,
    pub user_id: i32,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub group: Option<GroupDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct GroupMemberDto {
    pub id: i32,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub user: UserSummaryDto,
}
