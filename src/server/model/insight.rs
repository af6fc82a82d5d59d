//! Balance and activity calendar results of the insights engine.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::insight::{BalanceDto, CalendarDayDto, SphereShareDto};

#[derive(Debug, Clone, PartialEq)]
pub struct SphereShare {
    pub sphere: String,
    pub count: u32,
    pub weight: f64,
}

/// How evenly a user's recent activity is spread across spheres.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub window_days: u32,
    pub total_events: u32,
    /// Sorted by count, largest first.
    pub spheres: Vec<SphereShare>,
    /// Normalised Shannon entropy, 0 to 100.
    pub balance_score: u32,
    pub streak: u32,
    /// Share of days in the window with activity, two decimals.
    pub adherence: f64,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl Balance {
    pub fn empty(window_days: u32) -> Self {
        Self {
            window_days,
            total_events: 0,
            spheres: Vec::new(),
            balance_score: 0,
            streak: 0,
            adherence: 0.0,
            last_active_at: None,
        }
    }

    pub fn into_dto(self) -> BalanceDto {
        BalanceDto {
            window_days: self.window_days,
            total_events: self.total_events,
            spheres: self
                .spheres
                .into_iter()
                .map(|s| SphereShareDto {
                    sphere: s.sphere,
                    count: s.count,
                    weight: s.weight,
                })
                .collect(),
            balance_score: self.balance_score,
            streak: self.streak,
            adherence: self.adherence,
            last_active_at: self.last_active_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: u32,
    /// Distinct spheres touched that day, alphabetical.
    pub spheres: Vec<String>,
}

impl CalendarDay {
    pub fn into_dto(self) -> CalendarDayDto {
        CalendarDayDto {
            date: self.date,
            events: self.events,
            spheres: self.spheres,
        }
    }
}
