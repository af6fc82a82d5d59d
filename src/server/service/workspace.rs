//! Workspaces and the role checks shared by member and team goal operations.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    model::workspace::{CreateWorkspaceDto, UpdateWorkspaceDto},
    server::{
        data::{
            team_goal::TeamGoalRepository, user::UserRepository,
            workspace::WorkspaceRepository, workspace_member::WorkspaceMemberRepository,
        },
        error::AppError,
        model::workspace::{
            CreateWorkspaceParam, UpdateWorkspaceParam, Workspace, WorkspaceDetail,
            WorkspaceMemberWithUser, WorkspaceMembership, WorkspaceRole, WorkspaceSummary,
        },
    },
};

/// Loads the caller's membership and checks it has at least `min` rank.
///
/// # Returns
/// - `Ok(WorkspaceMembership)` - The caller's membership
/// - `Err(AppError::Forbidden)` - Not a member, or the role ranks below `min`
pub async fn require_role(
    db: &DatabaseConnection,
    workspace_id: i32,
    user_id: i32,
    min: WorkspaceRole,
) -> Result<WorkspaceMembership, AppError> {
    match WorkspaceMemberRepository::new(db)
        .find(workspace_id, user_id)
        .await?
    {
        Some(membership) if membership.role >= min => Ok(membership),
        _ => Err(AppError::Forbidden("Insufficient permissions".to_string())),
    }
}

/// Pairs memberships with their users, dropping memberships whose user is gone.
pub async fn with_users(
    db: &DatabaseConnection,
    memberships: Vec<WorkspaceMembership>,
) -> Result<Vec<WorkspaceMemberWithUser>, AppError> {
    let ids: Vec<i32> = memberships.iter().map(|m| m.user_id).collect();
    let mut users = UserRepository::new(db).find_by_ids(&ids).await?;

    Ok(memberships
        .into_iter()
        .filter_map(|membership| {
            users
                .remove(&membership.user_id)
                .map(|user| WorkspaceMemberWithUser { membership, user })
        })
        .collect())
}

pub struct WorkspaceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkspaceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a workspace owned by the caller.
    ///
    /// # Returns
    /// - `Ok(WorkspaceSummary)` - The new workspace with the caller as owner
    /// - `Err(AppError::BadRequest)` - Invalid name, slug or description
    /// - `Err(AppError::Conflict)` - The slug is taken
    pub async fn create(
        &self,
        user_id: i32,
        dto: CreateWorkspaceDto,
    ) -> Result<WorkspaceSummary, AppError> {
        let param = CreateWorkspaceParam::from_dto(dto)?;

        let repo = WorkspaceRepository::new(self.db);
        if repo.slug_exists(&param.slug).await? {
            return Err(AppError::Conflict(
                "Workspace with this slug already exists".to_string(),
            ));
        }

        let workspace = repo.create(param).await?;
        WorkspaceMemberRepository::new(self.db)
            .create(workspace.id, user_id, WorkspaceRole::Owner)
            .await?;

        tracing::info!("User {} created workspace {}", user_id, workspace.slug);

        Ok(WorkspaceSummary {
            workspace,
            role: WorkspaceRole::Owner,
            member_count: 1,
            goal_count: 0,
        })
    }

    /// Lists the caller's workspaces, most recently joined first.
    pub async fn list(&self, user_id: i32) -> Result<Vec<WorkspaceSummary>, AppError> {
        let memberships = WorkspaceMemberRepository::new(self.db)
            .get_by_user(user_id)
            .await?;
        let ids: Vec<i32> = memberships.iter().map(|m| m.workspace_id).collect();
        let mut workspaces: HashMap<i32, Workspace> = WorkspaceRepository::new(self.db)
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        let members = WorkspaceMemberRepository::new(self.db);
        let goals = TeamGoalRepository::new(self.db);

        let mut summaries = Vec::with_capacity(memberships.len());
        for membership in memberships {
            let Some(workspace) = workspaces.remove(&membership.workspace_id) else {
                continue;
            };
            summaries.push(WorkspaceSummary {
                member_count: members.count_by_workspace(workspace.id).await?,
                goal_count: goals.count_by_workspace(workspace.id).await?,
                workspace,
                role: membership.role,
            });
        }

        Ok(summaries)
    }

    /// Gets a workspace with its members.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No such workspace or the caller is not a member
    pub async fn get(&self, user_id: i32, workspace_id: i32) -> Result<WorkspaceDetail, AppError> {
        let members = WorkspaceMemberRepository::new(self.db);
        let not_found = || AppError::NotFound("Workspace not found or access denied".to_string());

        if members.find(workspace_id, user_id).await?.is_none() {
            return Err(not_found());
        }
        let Some(workspace) = WorkspaceRepository::new(self.db)
            .find_by_id(workspace_id)
            .await?
        else {
            return Err(not_found());
        };

        let memberships = members.get_by_workspace(workspace_id).await?;

        Ok(WorkspaceDetail {
            workspace,
            members: with_users(self.db, memberships).await?,
            goal_count: TeamGoalRepository::new(self.db)
                .count_by_workspace(workspace_id)
                .await?,
        })
    }

    /// Updates name, description or settings. Requires admin or owner.
    pub async fn update(
        &self,
        user_id: i32,
        workspace_id: i32,
        dto: UpdateWorkspaceDto,
    ) -> Result<Workspace, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Admin).await?;
        let param = UpdateWorkspaceParam::from_dto(dto)?;

        WorkspaceRepository::new(self.db)
            .update(workspace_id, param)
            .await?
            .ok_or_else(|| AppError::NotFound("Workspace not found".to_string()))
    }

    /// Deletes a workspace with its members, invitations and team goals. Owner only.
    pub async fn delete(&self, user_id: i32, workspace_id: i32) -> Result<(), AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Owner).await?;

        WorkspaceRepository::new(self.db).delete(workspace_id).await?;

        tracing::info!("User {} deleted workspace {}", user_id, workspace_id);

        Ok(())
    }
}
