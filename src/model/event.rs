use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
pub struct CreateEventDto {
    pub event_type: String,
    pub occurred_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<Object>)]
    pub payload: Option<Value>,
    pub client_event_id: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    pub step_id: Option<i32>,
    pub subtask_id: Option<i32>,
    pub source: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CreatedEventDto {
    pub id: i32,
    pub duplicate: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct EventDto {
    pub id: i32,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    #[schema(value_type = Option<Object>)]
    pub payload: Option<Value>,
    pub client_event_id: Option<String>,
    pub source: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    pub step_id: Option<i32>,
    pub subtask_id: Option<i32>,
}

#[derive(Deserialize, Clone, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventQueryDto {
    pub event_type: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    /// First UTC day included.
    pub start_date: Option<NaiveDate>,
    /// Last UTC day included.
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
