//! Team goals: shared targets that workspace members contribute steps to.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::team_goal::{AddTeamGoalStepDto, CreateTeamGoalDto, UpdateTeamGoalDto},
    server::{
        data::{
            team_goal::{TeamGoalFilter, TeamGoalRepository},
            user::UserRepository,
            workspace_member::WorkspaceMemberRepository,
        },
        error::AppError,
        model::{
            goal::validate_choice,
            team_goal::{
                AddTeamGoalStepParam, Contributor, CreateTeamGoalParam, TeamGoal, TeamGoalDetail,
                TeamGoalStep, TeamGoalSummary, UpdateTeamGoalParam, DETAIL_STEPS,
                STATUSES, STATUS_ACTIVE, STATUS_COMPLETED, TOP_CONTRIBUTORS,
            },
            workspace::{WorkspaceMembership, WorkspaceRole},
        },
        service::workspace::require_role,
    },
};

pub struct TeamGoalService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamGoalService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads a goal that must belong to `workspace_id`.
    async fn find_in(&self, workspace_id: i32, goal_id: i32) -> Result<TeamGoal, AppError> {
        match TeamGoalRepository::new(self.db).find_by_id(goal_id).await? {
            Some(goal) if goal.workspace_id == workspace_id => Ok(goal),
            _ => Err(AppError::NotFound("Team goal not found".to_string())),
        }
    }

    /// Aggregates current value, contributors and counts for a goal.
    async fn summarize(
        &self,
        goal: TeamGoal,
        contributor_limit: Option<u64>,
    ) -> Result<TeamGoalSummary, AppError> {
        let repo = TeamGoalRepository::new(self.db);

        let contributors = repo.get_contributors(goal.id, contributor_limit).await?;
        let mut user_ids: Vec<i32> = contributors.iter().map(|c| c.user_id).collect();
        user_ids.push(goal.owner_id);
        let mut users = UserRepository::new(self.db).find_by_ids(&user_ids).await?;

        let Some(owner) = users.get(&goal.owner_id).cloned() else {
            return Err(AppError::NotFound("Team goal owner not found".to_string()));
        };
        let contributors = contributors
            .into_iter()
            .filter_map(|c| {
                users.remove(&c.user_id).map(|user| Contributor {
                    user,
                    contribution: c.contribution,
                })
            })
            .collect();

        Ok(TeamGoalSummary {
            current_value: repo.sum_steps(goal.id).await?,
            steps_count: repo.count_steps(goal.id).await?,
            contributors_count: repo.count_contributors(goal.id).await?,
            goal,
            owner,
            contributors,
        })
    }

    /// Creates a team goal. Requires manager rank or above.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Invalid payload, or the owner is not a member
    pub async fn create(
        &self,
        user_id: i32,
        workspace_id: i32,
        dto: CreateTeamGoalDto,
    ) -> Result<TeamGoalSummary, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Manager).await?;
        let param = CreateTeamGoalParam::from_dto(workspace_id, user_id, dto)?;

        if WorkspaceMemberRepository::new(self.db)
            .find(workspace_id, param.owner_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(
                "Goal owner must be a member of the workspace".to_string(),
            ));
        }

        let goal = TeamGoalRepository::new(self.db).create(param).await?;

        self.summarize(goal, Some(TOP_CONTRIBUTORS)).await
    }

    /// Lists a workspace's team goals with their top contributors, newest first.
    pub async fn list(
        &self,
        user_id: i32,
        workspace_id: i32,
        filter: TeamGoalFilter,
    ) -> Result<Vec<TeamGoalSummary>, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Member).await?;
        validate_choice("status", filter.status.as_deref(), STATUSES)?;

        let goals = TeamGoalRepository::new(self.db)
            .get_by_workspace(workspace_id, filter)
            .await?;

        let mut summaries = Vec::with_capacity(goals.len());
        for goal in goals {
            summaries.push(self.summarize(goal, Some(TOP_CONTRIBUTORS)).await?);
        }

        Ok(summaries)
    }

    /// Gets a team goal with every contributor and its latest steps.
    pub async fn get(
        &self,
        user_id: i32,
        workspace_id: i32,
        goal_id: i32,
    ) -> Result<TeamGoalDetail, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Member).await?;
        let goal = self.find_in(workspace_id, goal_id).await?;

        let steps = TeamGoalRepository::new(self.db)
            .get_steps(goal.id, DETAIL_STEPS)
            .await?;
        let user_ids: Vec<i32> = steps.iter().map(|s| s.user_id).collect();
        let users = UserRepository::new(self.db).find_by_ids(&user_ids).await?;

        let steps = steps
            .into_iter()
            .filter_map(|step| {
                users.get(&step.user_id).cloned().map(|user| TeamGoalStep {
                    id: step.id,
                    team_goal_id: step.team_goal_id,
                    value: step.value,
                    note: step.note,
                    created_at: step.created_at,
                    user,
                })
            })
            .collect();

        Ok(TeamGoalDetail {
            summary: self.summarize(goal, None).await?,
            steps,
        })
    }

    /// Logs a contribution and completes the goal once the target is reached.
    ///
    /// # Returns
    /// - `Ok(TeamGoalStep)` - The stored step
    /// - `Err(AppError::Forbidden)` - Not a member, or the goal is already completed
    /// - `Err(AppError::BadRequest)` - Value out of range, note too long, or the caller's
    ///   total would overflow
    pub async fn add_step(
        &self,
        user_id: i32,
        workspace_id: i32,
        goal_id: i32,
        dto: AddTeamGoalStepDto,
    ) -> Result<TeamGoalStep, AppError> {
        require_role(self.db, workspace_id, user_id, WorkspaceRole::Member).await?;
        let goal = self.find_in(workspace_id, goal_id).await?;
        if goal.status == STATUS_COMPLETED {
            return Err(AppError::Forbidden(
                "Cannot add steps to completed goal".to_string(),
            ));
        }
        let param = AddTeamGoalStepParam::new(dto.value, dto.note)?;

        let repo = TeamGoalRepository::new(self.db);
        let Some(step) = repo
            .add_step(goal.id, user_id, param.value, param.note)
            .await?
        else {
            return Err(AppError::BadRequest(
                "Contribution total is too large".to_string(),
            ));
        };

        let current = repo.sum_steps(goal.id).await?;
        if current >= i64::from(goal.target_value) && goal.status == STATUS_ACTIVE {
            repo.mark_completed(goal.id, Utc::now()).await?;
            tracing::info!(
                "Team goal {} in workspace {} reached its target",
                goal.id,
                workspace_id
            );
        }

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };

        Ok(TeamGoalStep {
            id: step.id,
            team_goal_id: step.team_goal_id,
            value: step.value,
            note: step.note,
            created_at: step.created_at,
            user,
        })
    }

    /// The goal owner and workspace admins or owners may edit or delete a goal.
    fn can_manage(goal: &TeamGoal, caller: &WorkspaceMembership) -> bool {
        goal.owner_id == caller.user_id || caller.role >= WorkspaceRole::Admin
    }

    pub async fn update(
        &self,
        user_id: i32,
        workspace_id: i32,
        goal_id: i32,
        dto: UpdateTeamGoalDto,
    ) -> Result<TeamGoalSummary, AppError> {
        let caller = require_role(self.db, workspace_id, user_id, WorkspaceRole::Member).await?;
        let goal = self.find_in(workspace_id, goal_id).await?;
        if !Self::can_manage(&goal, &caller) {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        let param = UpdateTeamGoalParam::from_dto(dto)?;
        if let Some(owner_id) = param.owner_id {
            if WorkspaceMemberRepository::new(self.db)
                .find(workspace_id, owner_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(
                    "Goal owner must be a member of the workspace".to_string(),
                ));
            }
        }

        let Some(updated) = TeamGoalRepository::new(self.db)
            .update(goal.id, param)
            .await?
        else {
            return Err(AppError::NotFound("Team goal not found".to_string()));
        };

        self.summarize(updated, Some(TOP_CONTRIBUTORS)).await
    }

    pub async fn delete(
        &self,
        user_id: i32,
        workspace_id: i32,
        goal_id: i32,
    ) -> Result<(), AppError> {
        let caller = require_role(self.db, workspace_id, user_id, WorkspaceRole::Member).await?;
        let goal = self.find_in(workspace_id, goal_id).await?;
        if !Self::can_manage(&goal, &caller) {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        TeamGoalRepository::new(self.db).delete(goal.id).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::team_goal::MAX_STEP_VALUE;
    use test_utils::{
        builder::TestBuilder,
        factory::{
            create_member, create_team_goal, create_user, helpers::create_workspace_with_owner,
            team_goal::TeamGoalFactory,
        },
    };

    fn step(value: i32) -> AddTeamGoalStepDto {
        AddTeamGoalStepDto { value, note: None }
    }

    /// Tests team goal creation by a member and by a manager.
    ///
    /// Expected: Forbidden for the member; the manager's goal defaults owner and visibility
    #[tokio::test]
    async fn create_requires_manager() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (_, workspace, _) = create_workspace_with_owner(db).await?;
        let member = create_user(db).await?;
        create_member(db, workspace.id, member.id, "member").await?;
        let manager = create_user(db).await?;
        create_member(db, workspace.id, manager.id, "manager").await?;
        let service = TeamGoalService::new(db);

        let dto = CreateTeamGoalDto {
            title: "Ship v2".to_string(),
            description: None,
            target_value: 10,
            category: None,
            owner_id: None,
            visibility: None,
        };

        let result = service.create(member.id, workspace.id, dto.clone()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let created = service.create(manager.id, workspace.id, dto).await?;
        assert_eq!(created.owner.id, manager.id);
        assert_eq!(created.goal.visibility, "workspace");
        assert_eq!(created.current_value, 0);

        Ok(())
    }

    /// Tests contributions that reach the target.
    ///
    /// Expected: contributions accumulate per member, the goal completes, and further
    /// steps are forbidden
    #[tokio::test]
    async fn reaching_target_completes_goal() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        let member = create_user(db).await?;
        create_member(db, workspace.id, member.id, "member").await?;
        let goal = TeamGoalFactory::new(db, workspace.id, owner.id)
            .target_value(10)
            .build()
            .await?;
        let service = TeamGoalService::new(db);

        service.add_step(member.id, workspace.id, goal.id, step(4)).await?;
        service.add_step(member.id, workspace.id, goal.id, step(3)).await?;
        service.add_step(owner.id, workspace.id, goal.id, step(3)).await?;

        let detail = service.get(member.id, workspace.id, goal.id).await?;
        assert_eq!(detail.summary.current_value, 10);
        assert_eq!(detail.summary.goal.status, STATUS_COMPLETED);
        assert_eq!(detail.summary.contributors_count, 2);
        assert_eq!(detail.summary.contributors[0].user.id, member.id);
        assert_eq!(detail.summary.contributors[0].contribution, 7);
        assert_eq!(detail.steps.len(), 3);

        let result = service.add_step(member.id, workspace.id, goal.id, step(1)).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        Ok(())
    }

    /// Tests adding a step as an outsider and with an invalid value.
    ///
    /// Expected: Forbidden and BadRequest
    #[tokio::test]
    async fn add_step_validation() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        let goal = create_team_goal(db, workspace.id, owner.id).await?;
        let outsider = create_user(db).await?;
        let service = TeamGoalService::new(db);

        let result = service.add_step(outsider.id, workspace.id, goal.id, step(1)).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let result = service.add_step(owner.id, workspace.id, goal.id, step(0)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service
            .add_step(owner.id, workspace.id, goal.id, step(MAX_STEP_VALUE + 1))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        Ok(())
    }

    /// Tests listing with a status filter.
    ///
    /// Expected: an unknown status is rejected, a known one filters the goals
    #[tokio::test]
    async fn list_validates_status_filter() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        create_team_goal(db, workspace.id, owner.id).await?;
        let service = TeamGoalService::new(db);

        let unknown = TeamGoalFilter {
            status: Some("paused".to_string()),
            ..Default::default()
        };
        let result = service.list(owner.id, workspace.id, unknown).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let active = TeamGoalFilter {
            status: Some(STATUS_ACTIVE.to_string()),
            ..Default::default()
        };
        assert_eq!(service.list(owner.id, workspace.id, active).await?.len(), 1);

        let completed = TeamGoalFilter {
            status: Some(STATUS_COMPLETED.to_string()),
            ..Default::default()
        };
        assert!(service.list(owner.id, workspace.id, completed).await?.is_empty());

        Ok(())
    }

    /// Tests update and delete rights on someone else's goal.
    ///
    /// Expected: a plain member is forbidden, the workspace owner may delete
    #[tokio::test]
    async fn only_goal_owner_or_admin_manages() -> Result<(), AppError> {
        let test = TestBuilder::new().with_workspace_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (owner, workspace, _) = create_workspace_with_owner(db).await?;
        let manager = create_user(db).await?;
        create_member(db, workspace.id, manager.id, "manager").await?;
        let member = create_user(db).await?;
        create_member(db, workspace.id, member.id, "member").await?;
        let goal = create_team_goal(db, workspace.id, manager.id).await?;
        let service = TeamGoalService::new(db);

        let rename = UpdateTeamGoalDto {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let result = service.update(member.id, workspace.id, goal.id, rename.clone()).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        let updated = service.update(manager.id, workspace.id, goal.id, rename).await?;
        assert_eq!(updated.goal.title, "Renamed");

        let result = service.delete(member.id, workspace.id, goal.id).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        service.delete(owner.id, workspace.id, goal.id).await?;

        let result = service.get(owner.id, workspace.id, goal.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
