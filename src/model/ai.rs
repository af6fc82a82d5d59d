use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AiMessageDto {
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: i32,
    pub message: String,
    pub emoji: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub shown: bool,
    pub dismissed: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct InsightStatsDto {
    pub streak: i32,
    pub total_progress: f64,
    pub active_goals: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct InsightsResponseDto {
    pub messages: Vec<AiMessageDto>,
    pub stats: InsightStatsDto,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserSnapshotDto {
    pub id: i32,
    pub days_active: i64,
    pub last_active_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GoalsSnapshotDto {
    pub total: u32,
    pub active: u32,
    pub completed: u32,
    pub completed_by_sphere: BTreeMap<String, u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ActivitySnapshotDto {
    pub streak: i32,
    pub longest_streak: i32,
    pub avg_steps_per_day: f64,
    pub total_steps: u32,
    pub last_step_date: Option<DateTime<Utc>>,
    pub days_since_last_step: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct PatternsSnapshotDto {
    pub most_active_day: Option<String>,
    pub most_active_hour: Option<u32>,
    pub avg_goal_duration: f64,
    pub completion_rate: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GoalProgressDto {
    pub goal_id: i32,
    pub title: String,
    pub sphere: Option<String>,
    pub progress: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub velocity: f64,
    pub days_active: i64,
    pub days_since_last_step: i64,
    pub days_to_complete: Option<i64>,
    pub is_stagnant: bool,
    pub is_rushing: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct UserAnalyticsDto {
    pub user: UserSnapshotDto,
    pub goals: GoalsSnapshotDto,
    pub activity: ActivitySnapshotDto,
    pub patterns: PatternsSnapshotDto,
    pub recent_goals: Vec<GoalProgressDto>,
}
