//! Workspace membership: listing, invitations, role changes and departures.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::workspace::InviteMemberDto,
    server::{
        data::{
            team_goal::TeamGoalRepository,
            user::UserRepository,
            workspace::WorkspaceRepository,
            workspace_invite::{NewInvite, WorkspaceInviteRepository},
            workspace_member::WorkspaceMemberRepository,
        },
        error::AppError,
        model::workspace::{
            AcceptedInvite, InviteWithDetails, MemberStats, WorkspaceInvite,
            WorkspaceMemberWithUser, WorkspaceMembership, WorkspaceRole, INVITE_TOKEN_LENGTH,
            INVITE_TTL_DAYS,
        },
        service::workspace::{require_role, with_users},
        util::token::random_token,
    },
};

pub struct MemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists members with their team goal contributions.
    ///
    /// Owners come first, then admins, managers and members; equal roles by join time.
    pub async fn list(
        &self,
        user_id: i32,
        workspace_id: i32,
    ) -> Result<Vec<(WorkspaceMemberWithUser, MemberStats)>, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Member).await?;

        let mut memberships = WorkspaceMemberRepository::new(self.db)
            .get_by_workspace(workspace_id)
            .await?;
        memberships.sort_by(|a, b| {
            b.role
                .cmp(&a.role)
                .then_with(|| a.joined_at.cmp(&b.joined_at))
        });

        let stats = TeamGoalRepository::new(self.db)
            .get_member_stats(workspace_id)
            .await?;

        Ok(with_users(self.db, memberships)
            .await?
            .into_iter()
            .map(|member| {
                let (total_contribution, steps_count) = stats
                    .get(&member.user.id)
                    .copied()
                    .unwrap_or_default();
                (
                    member,
                    MemberStats {
                        total_contribution,
                        steps_count,
                    },
                )
            })
            .collect())
    }

    /// Invites a registered user by email. Requires manager rank or above.
    ///
    /// # Returns
    /// - `Ok(InviteWithDetails)` - The invitation, valid for seven days
    /// - `Err(AppError::BadRequest)` - Unknown role or an attempt to invite an owner
    /// - `Err(AppError::NotFound)` - No user with that email
    /// - `Err(AppError::Conflict)` - Already a member or already invited
    pub async fn invite(
        &self,
        user_id: i32,
        workspace_id: i32,
        dto: InviteMemberDto,
    ) -> Result<InviteWithDetails, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Manager).await?;

        let role: WorkspaceRole = dto.role.parse()?;
        if !role.is_invitable() {
            return Err(AppError::BadRequest(
                "Role must be member, manager or admin".to_string(),
            ));
        }

        let users = UserRepository::new(self.db);
        let Some(invited) = users.find_by_email(&dto.email).await? else {
            return Err(AppError::NotFound(
                "User with this email not found".to_string(),
            ));
        };

        if WorkspaceMemberRepository::new(self.db)
            .find(workspace_id, invited.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "User is already a member of this workspace".to_string(),
            ));
        }

        let now = Utc::now();
        let invites = WorkspaceInviteRepository::new(self.db);
        if invites
            .find_active(workspace_id, &invited.email, now)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Active invitation already exists".to_string(),
            ));
        }

        let invite = invites
            .create(NewInvite {
                workspace_id,
                email: invited.email,
                role,
                token: random_token(INVITE_TOKEN_LENGTH),
                invited_by: user_id,
                expires_at: now + Duration::days(INVITE_TTL_DAYS),
            })
            .await?;

        self.with_details(invite).await
    }

    /// Accepts an invitation addressed to the caller's email.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Unknown token
    /// - `Err(AppError::BadRequest)` - Already accepted or expired
    /// - `Err(AppError::Forbidden)` - The invitation is for another email
    /// - `Err(AppError::Conflict)` - The caller is already a member
    pub async fn accept(&self, user_id: i32, token: &str) -> Result<AcceptedInvite, AppError> {
        let invites = WorkspaceInviteRepository::new(self.db);
        let Some(invite) = invites.find_by_token(token).await? else {
            return Err(AppError::NotFound("Invitation not found".to_string()));
        };

        let now = Utc::now();
        if invite.accepted_at.is_some() {
            return Err(AppError::BadRequest(
                "Invitation already accepted".to_string(),
            ));
        }
        if invite.is_expired(now) {
            return Err(AppError::BadRequest("Invitation expired".to_string()));
        }

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };
        if !user.email.eq_ignore_ascii_case(&invite.email) {
            return Err(AppError::Forbidden(
                "This invitation is for another user".to_string(),
            ));
        }

        let members = WorkspaceMemberRepository::new(self.db);
        if members.find(invite.workspace_id, user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "You are already a member of this workspace".to_string(),
            ));
        }

        let Some(workspace) = WorkspaceRepository::new(self.db)
            .find_by_id(invite.workspace_id)
            .await?
        else {
            return Err(AppError::NotFound("Workspace not found".to_string()));
        };

        let membership = members
            .create(invite.workspace_id, user_id, invite.role)
            .await?;
        invites.mark_accepted(invite.id, now).await?;

        tracing::info!(
            "User {} joined workspace {} as {}",
            user_id,
            workspace.slug,
            membership.role
        );

        Ok(AcceptedInvite {
            workspace,
            membership,
        })
    }

    /// Pending, unexpired invitations addressed to the caller, newest first.
    pub async fn my_invites(&self, user_id: i32) -> Result<Vec<InviteWithDetails>, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        let invites = WorkspaceInviteRepository::new(self.db)
            .get_pending_for_email(&user.email, Utc::now())
            .await?;

        let mut detailed = Vec::with_capacity(invites.len());
        for invite in invites {
            match self.with_details(invite).await {
                Ok(invite) => detailed.push(invite),
                Err(AppError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(detailed)
    }

    async fn with_details(&self, invite: WorkspaceInvite) -> Result<InviteWithDetails, AppError> {
        let Some(workspace) = WorkspaceRepository::new(self.db)
            .find_by_id(invite.workspace_id)
            .await?
        else {
            return Err(AppError::NotFound("Workspace not found".to_string()));
        };
        let Some(invited_by) = UserRepository::new(self.db)
            .find_by_id(invite.invited_by)
            .await?
        else {
            return Err(AppError::NotFound("Inviter not found".to_string()));
        };

        Ok(InviteWithDetails {
            invite,
            workspace,
            invited_by,
        })
    }

    /// Loads a membership that must belong to `workspace_id`.
    async fn member_of(
        &self,
        workspace_id: i32,
        member_id: i32,
    ) -> Result<WorkspaceMembership, AppError> {
        match WorkspaceMemberRepository::new(self.db)
            .find_by_id(member_id)
            .await?
        {
            Some(member) if member.workspace_id == workspace_id => Ok(member),
            _ => Err(AppError::NotFound("Member not found".to_string())),
        }
    }

    /// Changes a member's role. Requires admin rank or above.
    ///
    /// The owner's role cannot be changed, and admins can only hand out member and
    /// manager.
    pub async fn update_role(
        &self,
        user_id: i32,
        workspace_id: i32,
        member_id: i32,
        role: &str,
    ) -> Result<WorkspaceMemberWithUser, AppError> {
        let caller = require_role(self.db, workspace_id, user_id, WorkspaceRole::Admin).await?;
        let role: WorkspaceRole = role.parse()?;

        let member = self.member_of(workspace_id, member_id).await?;
        if member.role == WorkspaceRole::Owner {
            return Err(AppError::Forbidden("Cannot change owner role".to_string()));
        }
        if caller.role == WorkspaceRole::Admin && role >= WorkspaceRole::Admin {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        let Some(updated) = WorkspaceMemberRepository::new(self.db)
            .update_role(member.id, role)
            .await?
        else {
            return Err(AppError::NotFound("Member not found".to_string()));
        };

        with_users(self.db, vec![updated])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Removes another member. Requires admin rank or above; the owner cannot be removed.
    pub async fn remove(
        &self,
        user_id: i32,
        workspace_id: i32,
        member_id: i32,
    ) -> Result<(), AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Admin).await?;

        let member = self.member_of(workspace_id, member_id).await?;
        if member.role == WorkspaceRole::Owner {
            return Err(AppError::Forbidden(
                "Cannot remove workspace owner".to_string(),
            ));
        }
        if member.user_id == user_id {
            return Err(AppError::BadRequest(
                "Use leave endpoint to exit workspace".to_string(),
            ));
        }

        WorkspaceMemberRepository::new(self.db)
            .delete(member.id)
            .await?;

        Ok(())
    }

    /// Leaves a workspace. The owner has to delete it instead.
    pub async fn leave(&self, user_id: i32, workspace_id: i32) -> Result<(), AppError> {
        let members = WorkspaceMemberRepository::new(self.db);
        let Some(member) = members.find(workspace_id, user_id).await? else {
            return Err(AppError::NotFound(
                "You are not a member of this workspace".to_string(),
            ));
        };
        if member.role == WorkspaceRole::Owner {
            return Err(AppError::BadRequest(
                "Owner must transfer ownership or delete workspace".to_string(),
            ));
        }

        members.delete(member.id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::{
            create_member, create_user, helpers::create_workspace_with_owner,
            workspace::create_invite,
        },
    };

    fn invite_dto(email: &str, role: &str) -> InviteMemberDto {
        InviteMemberDto {
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    /// Tests the invite and accept flow.
    ///
    /// Expected: the invitee joins with the invited role, a second accept fails
    #[tokio::test]
    async fn invitee_joins_with_invited_role() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        let invitee = create_user(db).await?;
        let service = MemberService::new(db);

        let invite = service
            .invite(owner.id, workspace.id, invite_dto(&invitee.email, "manager"))
            .await?;
        assert_eq!(invite.invite.token.len(), INVITE_TOKEN_LENGTH);
        assert_eq!(service.my_invites(invitee.id).await?.len(), 1);

        let accepted = service.accept(invitee.id, &invite.invite.token).await?;
        assert_eq!(accepted.membership.role, WorkspaceRole::Manager);
        assert!(service.my_invites(invitee.id).await?.is_empty());

        let again = service.accept(invitee.id, &invite.invite.token).await;
        assert!(matches!(again, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests invitation failures.
    ///
    /// Expected: Forbidden for a plain member, NotFound for an unknown email, Conflict
    /// for an existing member and for a second active invitation
    #[tokio::test]
    async fn invite_rejections() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        let member = create_user(db).await?;
        create_member(db, workspace.id, member.id, "member").await?;
        let invitee = create_user(db).await?;
        let service = MemberService::new(db);

        let result = service
            .invite(member.id, workspace.id, invite_dto(&invitee.email, "member"))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let result = service
            .invite(owner.id, workspace.id, invite_dto("nobody@example.com", "member"))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let result = service
            .invite(owner.id, workspace.id, invite_dto(&member.email, "member"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        service
            .invite(owner.id, workspace.id, invite_dto(&invitee.email, "member"))
            .await?;
        let result = service
            .invite(owner.id, workspace.id, invite_dto(&invitee.email, "admin"))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        Ok(())
    }

    /// Tests accepting an expired invitation and one addressed to someone else.
    ///
    /// Expected: BadRequest and Forbidden
    #[tokio::test]
    async fn accept_checks_expiry_and_email() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        let invitee = create_user(db).await?;
        let stranger = create_user(db).await?;
        let service = MemberService::new(db);

        let expired = create_invite(
            db,
            workspace.id,
            owner.id,
            &invitee.email,
            Utc::now() - Duration::hours(1),
        )
        .await?;
        let result = service.accept(invitee.id, &expired.token).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let valid = create_invite(
            db,
            workspace.id,
            owner.id,
            &invitee.email,
            Utc::now() + Duration::days(1),
        )
        .await?;
        let result = service.accept(stranger.id, &valid.token).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        Ok(())
    }

    /// Tests role changes by an admin.
    ///
    /// Expected: promoting to manager works, promoting to admin and touching the owner
    /// are forbidden
    #[tokio::test]
    async fn admin_role_changes_are_limited() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (_, workspace, owner_membership) = create_workspace_with_owner(db).await?;
        let admin = create_user(db).await?;
        create_member(db, workspace.id, admin.id, "admin").await?;
        let user = create_user(db).await?;
        let membership = create_member(db, workspace.id, user.id, "member").await?;
        let service = MemberService::new(db);

        let updated = service
            .update_role(admin.id, workspace.id, membership.id, "manager")
            .await?;
        assert_eq!(updated.membership.role, WorkspaceRole::Manager);

        let result = service
            .update_role(admin.id, workspace.id, membership.id, "admin")
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let result = service
            .update_role(admin.id, workspace.id, owner_membership.id, "member")
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        Ok(())
    }

    /// Tests removal and leaving.
    ///
    /// Expected: owner cannot be removed or leave, self removal is refused, a member
    /// can leave
    #[tokio::test]
    async fn remove_and_leave_rules() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, owner_membership) = create_workspace_with_owner(db).await?;
        let admin = create_user(db).await?;
        let admin_membership = create_member(db, workspace.id, admin.id, "admin").await?;
        let user = create_user(db).await?;
        let membership = create_member(db, workspace.id, user.id, "member").await?;
        let service = MemberService::new(db);

        let result = service
            .remove(admin.id, workspace.id, owner_membership.id)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let result = service
            .remove(admin.id, workspace.id, admin_membership.id)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service.leave(owner.id, workspace.id).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        service.leave(user.id, workspace.id).await?;
        let result = service.remove(admin.id, workspace.id, membership.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let members = service.list(owner.id, workspace.id).await?;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].0.membership.role, WorkspaceRole::Owner);

        Ok(())
    }
}
