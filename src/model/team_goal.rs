use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::user::UserSummaryDto;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateTeamGoalDto {
    pub title: String,
    pub description: Option<String>,
    pub target_value: i32,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
    pub visibility: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateTeamGoalDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<i32>,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
    pub visibility: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamGoalFilterDto {
    pub status: Option<String>,
    pub category: Option<String>,
    pub owner_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AddTeamGoalStepDto {
    pub value: i32,
    pub note: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ContributorDto {
    pub user: UserSummaryDto,
    pub contribution: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TeamGoalStepDto {
    pub id: i32,
    pub team_goal_id: i32,
    pub value: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: UserSummaryDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TeamGoalDto {
    pub id: i32,
    pub workspace_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub target_value: i32,
    pub current_value: i64,
    /// Percentage of the target reached, capped at 100.
    pub progress: f64,
    pub category: Option<String>,
    pub visibility: String,
    pub status: String,
    pub owner: UserSummaryDto,
    pub contributors: Vec<ContributorDto>,
    pub steps_count: u64,
    pub contributors_count: u64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct TeamGoalDetailDto {
    #[serde(flatten)]
    pub goal: TeamGoalDto,
    pub steps: Vec<TeamGoalStepDto>,
}
