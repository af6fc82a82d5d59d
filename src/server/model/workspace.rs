//! Workspace, membership and invitation models.
//!
//! Workspaces are team containers with a ranked role system. `WorkspaceRole` orders the
//! roles so permission checks compare ranks instead of matching strings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    model::workspace::{
        AcceptedInviteDto, CreateWorkspaceDto, InviteDto, MemberStatsDto, UpdateWorkspaceDto,
        WorkspaceDetailDto, WorkspaceDto, WorkspaceMemberDto, WorkspaceMemberUserDto,
        WorkspaceRefDto, WorkspaceSummaryDto,
    },
    server::{error::AppError, model::user::User},
};

pub const DEFAULT_PLAN: &str = "free";
pub const INVITE_TTL_DAYS: i64 = 7;
pub const INVITE_TOKEN_LENGTH: usize = 64;

/// Workspace roles, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkspaceRole {
    Member,
    Manager,
    Admin,
    Owner,
}

impl WorkspaceRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Manager => "manager",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Roles that can be handed out through an invitation.
    pub fn is_invitable(&self) -> bool {
        *self != Self::Owner
    }

    /// Parses a stored role, treating unknown values as the lowest rank.
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or(Self::Member)
    }
}

impl FromStr for WorkspaceRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "member" => Ok(Self::Member),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            other => Err(AppError::BadRequest(format!("Unknown role: {}", other))),
        }
    }
}

impl fmt::Display for WorkspaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: i32,
    pub name: String,
    /// Unique URL-safe identifier.
    pub slug: String,
    pub description: Option<String>,
    pub plan: String,
    pub settings: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn from_entity(entity: entity::workspace::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            plan: entity.plan,
            settings: entity.settings,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> WorkspaceDto {
        WorkspaceDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            plan: self.plan,
            settings: self.settings,
            created_at: self.created_at,
        }
    }

    pub fn to_ref_dto(&self) -> WorkspaceRefDto {
        WorkspaceRefDto {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateWorkspaceParam {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl CreateWorkspaceParam {
    /// Validates name, slug and description lengths and the slug alphabet.
    pub fn from_dto(dto: CreateWorkspaceDto) -> Result<Self, AppError> {
        validate_len("name", &dto.name, 3, 50)?;
        validate_len("slug", &dto.slug, 3, 50)?;
        if !dto
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(AppError::BadRequest(
                "Slug can only contain lowercase letters, numbers, and hyphens".to_string(),
            ));
        }
        if let Some(description) = &dto.description {
            validate_len("description", description, 0, 500)?;
        }

        Ok(Self {
            name: dto.name,
            slug: dto.slug,
            description: dto.description,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateWorkspaceParam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub settings: Option<Value>,
}

impl UpdateWorkspaceParam {
    pub fn from_dto(dto: UpdateWorkspaceDto) -> Result<Self, AppError> {
        if let Some(name) = &dto.name {
            validate_len("name", name, 1, 50)?;
        }
        if let Some(description) = &dto.description {
            validate_len("description", description, 0, 500)?;
        }

        Ok(Self {
            name: dto.name,
            description: dto.description,
            settings: dto.settings,
        })
    }
}

/// Checks a string's character count lies within `min..=max`.
pub fn validate_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::BadRequest(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

/// A workspace as seen by one of its members.
#[derive(Debug, Clone)]
pub struct WorkspaceSummary {
    pub workspace: Workspace,
    pub role: WorkspaceRole,
    pub member_count: u64,
    pub goal_count: u64,
}

impl WorkspaceSummary {
    pub fn into_dto(self) -> WorkspaceSummaryDto {
        WorkspaceSummaryDto {
            id: self.workspace.id,
            name: self.workspace.name,
            slug: self.workspace.slug,
            description: self.workspace.description,
            plan: self.workspace.plan,
            role: self.role.to_string(),
            member_count: self.member_count,
            goal_count: self.goal_count,
            created_at: self.workspace.created_at,
        }
    }
}

/// A workspace with its members, as returned to a member.
#[derive(Debug, Clone)]
pub struct WorkspaceDetail {
    pub workspace: Workspace,
    pub members: Vec<WorkspaceMemberWithUser>,
    pub goal_count: u64,
}

impl WorkspaceDetail {
    pub fn into_dto(self) -> WorkspaceDetailDto {
        WorkspaceDetailDto {
            workspace: self.workspace.into_dto(),
            members: self
                .members
                .into_iter()
                .map(WorkspaceMemberWithUser::into_user_dto)
                .collect(),
            goal_count: self.goal_count,
        }
    }
}

/// A membership row.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceMembership {
    pub id: i32,
    pub workspace_id: i32,
    pub user_id: i32,
    pub role: WorkspaceRole,
    pub position: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl WorkspaceMembership {
    pub fn from_entity(entity: entity::workspace_member::Model) -> Self {
        Self {
            id: entity.id,
            workspace_id: entity.workspace_id,
            user_id: entity.user_id,
            role: WorkspaceRole::from_stored(&entity.role),
            position: entity.position,
            joined_at: entity.joined_at,
        }
    }
}

/// A membership together with the member's user record.
#[derive(Debug, Clone)]
pub struct WorkspaceMemberWithUser {
    pub membership: WorkspaceMembership,
    pub user: User,
}

impl WorkspaceMemberWithUser {
    pub fn into_user_dto(self) -> WorkspaceMemberUserDto {
        WorkspaceMemberUserDto {
            id: self.membership.id,
            role: self.membership.role.to_string(),
            joined_at: self.membership.joined_at,
            user_id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            avatar_url: self.user.avatar_url,
        }
    }

    pub fn into_member_dto(self, stats: MemberStats) -> WorkspaceMemberDto {
        WorkspaceMemberDto {
            id: self.membership.id,
            user_id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            avatar_url: self.user.avatar_url,
            bio: self.user.bio,
            role: self.membership.role.to_string(),
            position: self.membership.position,
            joined_at: self.membership.joined_at,
            stats: MemberStatsDto {
                total_contribution: stats.total_contribution,
                steps_count: stats.steps_count,
            },
        }
    }
}

/// A member's aggregated contribution to the workspace's team goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub total_contribution: i64,
    pub steps_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceInvite {
    pub id: i32,
    pub workspace_id: i32,
    pub email: String,
    pub role: WorkspaceRole,
    /// Opaque random token used to accept the invitation.
    pub token: String,
    pub invited_by: i32,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl WorkspaceInvite {
    pub fn from_entity(entity: entity::workspace_invite::Model) -> Self {
        Self {
            id: entity.id,
            workspace_id: entity.workspace_id,
            email: entity.email,
            role: WorkspaceRole::from_stored(&entity.role),
            token: entity.token,
            invited_by: entity.invited_by,
            expires_at: entity.expires_at,
            accepted_at: entity.accepted_at,
            created_at: entity.created_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// An invitation together with its workspace and inviter.
#[derive(Debug, Clone)]
pub struct InviteWithDetails {
    pub invite: WorkspaceInvite,
    pub workspace: Workspace,
    pub invited_by: User,
}

impl InviteWithDetails {
    pub fn into_dto(self) -> InviteDto {
        InviteDto {
            id: self.invite.id,
            email: self.invite.email,
            role: self.invite.role.to_string(),
            token: self.invite.token,
            expires_at: self.invite.expires_at,
            created_at: self.invite.created_at,
            workspace: self.workspace.to_ref_dto(),
            invited_by: self.invited_by.to_summary_dto(),
        }
    }
}

/// Result of accepting an invitation.
#[derive(Debug, Clone)]
pub struct AcceptedInvite {
    pub workspace: Workspace,
    pub membership: WorkspaceMembership,
}

impl AcceptedInvite {
    pub fn into_dto(self) -> AcceptedInviteDto {
        AcceptedInviteDto {
            workspace: self.workspace.to_ref_dto(),
            role: self.membership.role.to_string(),
            joined_at: self.membership.joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ranked() {
        assert!(WorkspaceRole::Member < WorkspaceRole::Manager);
        assert!(WorkspaceRole::Manager < WorkspaceRole::Admin);
        assert!(WorkspaceRole::Admin < WorkspaceRole::Owner);
        assert_eq!("admin".parse::<WorkspaceRole>().unwrap(), WorkspaceRole::Admin);
        assert!("superuser".parse::<WorkspaceRole>().is_err());
    }

    #[test]
    fn slug_alphabet_is_enforced() {
        let dto = |slug: &str| CreateWorkspaceDto {
            name: "Team".to_string(),
            slug: slug.to_string(),
            description: None,
        };

        assert!(CreateWorkspaceParam::from_dto(dto("team-42")).is_ok());
        assert!(CreateWorkspaceParam::from_dto(dto("Team_42")).is_err());
        assert!(CreateWorkspaceParam::from_dto(dto("ab")).is_err());
    }
}
