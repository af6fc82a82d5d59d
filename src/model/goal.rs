use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct GoalDto {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub sphere: Option<String>,
    pub privacy: String,
    pub progress_type: String,
    pub target_value: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateGoalDto {
    pub title: String,
    pub description: Option<String>,
    pub sphere: Option<String>,
    pub privacy: Option<String>,
    pub progress_type: Option<String>,
    pub target_value: Option<f64>,
}

/// Partial goal update. Absent fields are left untouched; `completed_at: null` reopens
/// a completed goal.
#[derive(Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateGoalDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sphere: Option<String>,
    pub privacy: Option<String>,
    pub progress_type: Option<String>,
    pub target_value: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

/// Maps a present field (including an explicit `null`) to `Some`, so a missing field
/// stays `None` through `#[serde(default)]`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct SubtaskDto {
    pub id: i32,
    pub goal_id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CreateSubtaskDto {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct UpdateSubtaskDto {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct StepDto {
    pub id: i32,
    pub goal_id: i32,
    pub value: Option<f64>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct CreateStepDto {
    pub value: Option<f64>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_completed_at_is_untouched() {
        let dto: UpdateGoalDto = serde_json::from_str(r#"{"title":"Run"}"#).unwrap();
        assert_eq!(dto.title.as_deref(), Some("Run"));
        assert!(dto.completed_at.is_none());
    }

    #[test]
    fn null_completed_at_clears_completion() {
        let dto: UpdateGoalDto = serde_json::from_str(r#"{"completed_at":null}"#).unwrap();
        assert_eq!(dto.completed_at, Some(None));
    }

    #[test]
    fn timestamp_completed_at_sets_completion() {
        let dto: UpdateGoalDto =
            serde_json::from_str(r#"{"completed_at":"2026-03-01T10:00:00Z"}"#).unwrap();
        assert!(matches!(dto.completed_at, Some(Some(_))));
    }
}
