use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SphereShareDto {
    pub sphere: String,
    pub count: u32,
    /// Fraction of all active events in the window, 0 to 1.
    pub weight: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct BalanceDto {
    pub window_days: u32,
    pub total_events: u32,
    pub spheres: Vec<SphereShareDto>,
    pub balance_score: u32,
    pub streak: u32,
    pub adherence: f64,
    pub last_active_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct CalendarDayDto {
    pub date: NaiveDate,
    pub events: u32,
    pub spheres: Vec<String>,
}
