use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FriendshipDto {
    pub id: i32,
    pub requester_id: i32,
    pub addressee_id: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A pending request with both parties' public summaries.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct FriendRequestDto {
    pub id: i32,
    pub status: String,
    pub requester: UserSummaryDto,
    pub addressee: UserSummaryDto,
    pub created_at: DateTime<Utc>,
}
