use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::user::UserSummaryDto;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateWorkspaceDto {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateWorkspaceDto {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub settings: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct WorkspaceDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub plan: String,
    #[schema(value_type = Option<Object>)]
    pub settings: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// Workspace as listed for one of its members.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct WorkspaceSummaryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub plan: String,
    pub role: String,
    pub member_count: u64,
    pub goal_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct WorkspaceMemberUserDto {
    pub id: i32,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct WorkspaceDetailDto {
    #[serde(flatten)]
    pub workspace: WorkspaceDto,
    pub members: Vec<WorkspaceMemberUserDto>,
    pub goal_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct MemberStatsDto {
    pub total_contribution: i64,
    pub steps_count: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct WorkspaceMemberDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub role: String,
    pub position: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub stats: MemberStatsDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct InviteMemberDto {
    pub email: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UpdateMemberRoleDto {
    pub role: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct WorkspaceRefDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct InviteDto {
    pub id: i32,
    pub email: String,
    pub role: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub workspace: WorkspaceRefDto,
    pub invited_by: UserSummaryDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AcceptedInviteDto {
    pub workspace: WorkspaceRefDto,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}
