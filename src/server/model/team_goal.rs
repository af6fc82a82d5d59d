//! Team goals shared by a workspace.

use chrono::{DateTime, Utc};

use crate::{
    model::team_goal::{
        ContributorDto, CreateTeamGoalDto, TeamGoalDetailDto, TeamGoalDto, TeamGoalStepDto,
        UpdateTeamGoalDto,
    },
    server::{
        error::AppError,
        model::{goal::validate_choice, user::User, workspace::validate_len},
    },
};

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_COMPLETED, "archived"];

pub const VISIBILITIES: &[&str] = &["workspace", "team", "private"];
pub const DEFAULT_VISIBILITY: &str = "workspace";

/// Contributors listed on a team goal summary.
pub const TOP_CONTRIBUTORS: u64 = 5;
/// Steps included in a team goal detail view.
pub const DETAIL_STEPS: u64 = 50;
/// Largest value a single team goal step may carry.
pub const MAX_STEP_VALUE: i32 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamGoal {
    pub id: i32,
    pub workspace_id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub target_value: i32,
    pub category: Option<String>,
    pub visibility: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TeamGoal {
    pub fn from_entity(entity: entity::team_goal::Model) -> Self {
        Self {
            id: entity.id,
            workspace_id: entity.workspace_id,
            owner_id: entity.owner_id,
            title: entity.title,
            description: entity.description,
            target_value: entity.target_value,
            category: entity.category,
            visibility: entity.visibility,
            status: entity.status,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        }
    }
}

/// Percentage of `target` reached by `current`, capped at 100.
pub fn progress_percent(current: i64, target: i32) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    (current as f64 / target as f64 * 100.0).min(100.0)
}

#[derive(Debug, Clone)]
pub struct CreateTeamGoalParam {
    pub workspace_id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub target_value: i32,
    pub category: Option<String>,
    pub visibility: String,
}

impl CreateTeamGoalParam {
    /// Validates the payload; the owner defaults to the caller.
    pub fn from_dto(workspace_id: i32, caller_id: i32, dto: CreateTeamGoalDto) -> Result<Self, AppError> {
        if dto.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }
        if dto.target_value < 1 {
            return Err(AppError::BadRequest("target_value must be at least 1".to_string()));
        }
        validate_choice("visibility", dto.visibility.as_deref(), VISIBILITIES)?;

        Ok(Self {
            workspace_id,
            owner_id: dto.owner_id.unwrap_or(caller_id),
            title: dto.title,
            description: dto.description,
            target_value: dto.target_value,
            category: dto.category,
            visibility: dto
                .visibility
                .unwrap_or_else(|| DEFAULT_VISIBILITY.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTeamGoalParam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<i32>,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
    pub visibility: Option<String>,
}

impl UpdateTeamGoalParam {
    pub fn from_dto(dto: UpdateTeamGoalDto) -> Result<Self, AppError> {
        if matches!(dto.target_value, Some(v) if v < 1) {
            return Err(AppError::BadRequest("target_value must be at least 1".to_string()));
        }
        validate_choice("visibility", dto.visibility.as_deref(), VISIBILITIES)?;

        Ok(Self {
            title: dto.title,
            description: dto.description,
            target_value: dto.target_value,
            category: dto.category,
            owner_id: dto.owner_id,
            visibility: dto.visibility,
        })
    }
}

/// Validated contribution to a team goal.
#[derive(Debug, Clone)]
pub struct AddTeamGoalStepParam {
    pub value: i32,
    pub note: Option<String>,
}

impl AddTeamGoalStepParam {
    pub fn new(value: i32, note: Option<String>) -> Result<Self, AppError> {
        if !(1..=MAX_STEP_VALUE).contains(&value) {
            return Err(AppError::BadRequest(format!(
                "value must be between 1 and {}",
                MAX_STEP_VALUE
            )));
        }
        if let Some(note) = &note {
            validate_len("note", note, 0, 500)?;
        }
        Ok(Self { value, note })
    }
}

#[derive(Debug, Clone)]
pub struct Contributor {
    pub user: User,
    pub contribution: i32,
}

#[derive(Debug, Clone)]
pub struct TeamGoalStep {
    pub id: i32,
    pub team_goal_id: i32,
    pub value: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: User,
}

impl TeamGoalStep {
    pub fn into_dto(self) -> TeamGoalStepDto {
        TeamGoalStepDto {
            id: self.id,
            team_goal_id: self.team_goal_id,
            value: self.value,
            note: self.note,
            created_at: self.created_at,
            user: self.user.to_summary_dto(),
        }
    }
}

/// A team goal with its aggregated progress.
#[derive(Debug, Clone)]
pub struct TeamGoalSummary {
    pub goal: TeamGoal,
    pub owner: User,
    pub current_value: i64,
    pub contributors: Vec<Contributor>,
    pub steps_count: u64,
    pub contributors_count: u64,
}

impl TeamGoalSummary {
    pub fn into_dto(self) -> TeamGoalDto {
        TeamGoalDto {
            id: self.goal.id,
            workspace_id: self.goal.workspace_id,
            title: self.goal.title,
            description: self.goal.description,
            target_value: self.goal.target_value,
            current_value: self.current_value,
            progress: progress_percent(self.current_value, self.goal.target_value),
            category: self.goal.category,
            visibility: self.goal.visibility,
            status: self.goal.status,
            owner: self.owner.to_summary_dto(),
            contributors: self
                .contributors
                .into_iter()
                .map(|c| ContributorDto {
                    user: c.user.to_summary_dto(),
                    contribution: c.contribution,
                })
                .collect(),
            steps_count: self.steps_count,
            contributors_count: self.contributors_count,
            created_at: self.goal.created_at,
            completed_at: self.goal.completed_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TeamGoalDetail {
    pub summary: TeamGoalSummary,
    pub steps: Vec<TeamGoalStep>,
}

impl TeamGoalDetail {
    pub fn into_dto(self) -> TeamGoalDetailDto {
        TeamGoalDetailDto {
            goal: self.summary.into_dto(),
            steps: self.steps.into_iter().map(TeamGoalStep::into_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped_at_one_hundred() {
        assert_eq!(progress_percent(50, 200), 25.0);
        assert_eq!(progress_percent(300, 200), 100.0);
        assert_eq!(progress_percent(10, 0), 0.0);
    }

    #[test]
    fn step_value_must_be_positive() {
        assert!(AddTeamGoalStepParam::new(0, None).is_err());
        assert!(AddTeamGoalStepParam::new(1, Some("x".repeat(501))).is_err());
        assert!(AddTeamGoalStepParam::new(3, Some("done".to_string())).is_ok());
    }
}
