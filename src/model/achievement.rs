use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AchievementDto {
    pub id: i32,
    pub code: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = Option<Object>)]
    pub requirement: Option<Value>,
}

/// An achievement held by a user together with when it was unlocked.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct UserAchievementDto {
    pub achievement: AchievementDto,
    pub achieved_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AchievementCatalogDto {
    pub unlocked: Vec<UserAchievementDto>,
    pub locked: Vec<AchievementDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct AchievementStatsDto {
    pub total: u64,
    pub unlocked: u64,
    pub locked: u64,
    /// Percentage of the catalogue unlocked, 0 to 100.
    pub progress: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct AchievementProgressDto {
    pub achievement_id: i32,
    pub progress: u32,
}
