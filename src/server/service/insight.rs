//! Balance and activity calendar computed from the analytics event log.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::event::EventRepository,
    error::AppError,
    model::{
        event::{Event, ACTIVE_EVENT_TYPES},
        insight::{Balance, CalendarDay, SphereShare},
    },
};

pub const DEFAULT_WINDOW_DAYS: u32 = 14;
pub const LONG_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_CALENDAR_DAYS: u32 = 90;
const MAX_CALENDAR_DAYS: u32 = 365;

/// Maps the raw `?window=` value onto the two supported sizes. Anything but `30` is the
/// default window.
pub fn window_days(requested: Option<&str>) -> u32 {
    match requested.map(str::trim) {
        Some("30") => LONG_WINDOW_DAYS,
        _ => DEFAULT_WINDOW_DAYS,
    }
}

/// Normalised Shannon entropy of the sphere weights as a 0 to 100 score.
///
/// A single sphere scores 50.
pub fn balance_score(weights: &[f64]) -> u32 {
    match weights.len() {
        0 => 0,
        1 => 50,
        n => {
            let entropy: f64 = weights
                .iter()
                .filter(|w| **w > 0.0)
                .map(|w| -w * w.log2())
                .sum();
            let score = entropy / (n as f64).log2() * 100.0;
            score.clamp(0.0, 100.0).round() as u32
        }
    }
}

/// Active days counting back from `today`.
///
/// Walking from the newest day, each active day must fall on the expected day or the day
/// before it; the expected day then moves to the day before the matched one. One missing
/// day between counted days is tolerated, two end the streak.
pub fn active_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut expected = today;

    for &day in days.iter().rev().filter(|d| **d <= today) {
        let gap = (expected - day).num_days();
        if gap > 1 {
            break;
        }
        streak += 1;
        expected = day - Duration::days(1);
    }

    streak
}

/// Builds the balance over `window_days` from active events, oldest first.
pub fn compute_balance(events: &[Event], window_days: u32, today: NaiveDate) -> Balance {
    if events.is_empty() {
        return Balance::empty(window_days);
    }

    let total = events.len() as u32;
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for sphere in events.iter().filter_map(|e| e.sphere.as_deref()) {
        *counts.entry(sphere).or_insert(0) += 1;
    }

    let mut spheres: Vec<SphereShare> = counts
        .into_iter()
        .map(|(sphere, count)| SphereShare {
            sphere: sphere.to_string(),
            count,
            weight: count as f64 / total as f64,
        })
        .collect();
    spheres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.sphere.cmp(&b.sphere)));

    let weights: Vec<f64> = spheres.iter().map(|s| s.weight).collect();
    let active_days: BTreeSet<NaiveDate> =
        events.iter().map(|e| e.occurred_at.date_naive()).collect();
    let adherence = (active_days.len() as f64 / window_days as f64 * 100.0).round() / 100.0;

    Balance {
        window_days,
        total_events: total,
        balance_score: balance_score(&weights),
        streak: active_streak(&active_days, today),
        adherence,
        last_active_at: events.iter().map(|e| e.occurred_at).max(),
        spheres,
    }
}

/// Groups events per UTC day in ascending date order.
pub fn compute_calendar(events: &[Event]) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, (u32, BTreeSet<String>)> = BTreeMap::new();
    for event in events {
        let entry = days.entry(event.occurred_at.date_naive()).or_default();
        entry.0 += 1;
        if let Some(sphere) = &event.sphere {
            entry.1.insert(sphere.clone());
        }
    }

    days.into_iter()
        .map(|(date, (events, spheres))| CalendarDay {
            date,
            events,
            spheres: spheres.into_iter().collect(),
        })
        .collect()
}

pub struct InsightService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InsightService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn active_events_since(&self, user_id: i32, since: DateTime<Utc>) -> Result<Vec<Event>, AppError> {
        let events = EventRepository::new(self.db)
            .get_by_types_since(user_id, ACTIVE_EVENT_TYPES, since)
            .await?;

        Ok(events)
    }

    pub async fn balance(
        &self,
        user_id: i32,
        requested_window: Option<&str>,
    ) -> Result<Balance, AppError> {
        let window = window_days(requested_window);
        let now = Utc::now();
        let events = self
            .active_events_since(user_id, now - Duration::days(window as i64))
            .await?;

        Ok(compute_balance(&events, window, now.date_naive()))
    }

    pub async fn calendar(&self, user_id: i32, days: Option<u32>) -> Result<Vec<CalendarDay>, AppError> {
        let days = days.unwrap_or(DEFAULT_CALENDAR_DAYS).clamp(1, MAX_CALENDAR_DAYS);
        let events = self
            .active_events_since(user_id, Utc::now() - Duration::days(days as i64))
            .await?;

        Ok(compute_calendar(&events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn event(d: u32, hour: u32, sphere: Option<&str>) -> Event {
        let at = Utc.with_ymd_and_hms(2026, 3, d, hour, 0, 0).unwrap();
        Event {
            id: 0,
            user_id: 1,
            event_type: "create_step".to_string(),
            occurred_at: at,
            payload: None,
            client_event_id: None,
            source: None,
            sphere: sphere.map(str::to_string),
            goal_id: None,
            step_id: None,
            subtask_id: None,
            created_at: at,
        }
    }

    #[test]
    fn scores_balance_by_entropy() {
        assert_eq!(balance_score(&[]), 0);
        assert_eq!(balance_score(&[1.0]), 50);
        assert_eq!(balance_score(&[0.5, 0.5]), 100);
        // -(0.75 log2 0.75 + 0.25 log2 0.25) = 0.811
        assert_eq!(balance_score(&[0.75, 0.25]), 81);
    }

    #[test]
    fn streak_tolerates_one_day_before_latest() {
        let days: BTreeSet<NaiveDate> = [day(7), day(8), day(9)].into_iter().collect();

        assert_eq!(active_streak(&days, day(9)), 3);
        assert_eq!(active_streak(&days, day(10)), 3);
        assert_eq!(active_streak(&days, day(11)), 0);

        let gapped: BTreeSet<NaiveDate> = [day(5), day(8), day(9)].into_iter().collect();
        assert_eq!(active_streak(&gapped, day(9)), 2);
    }

    #[test]
    fn streak_tolerates_single_missing_days_throughout() {
        let every_other: BTreeSet<NaiveDate> = [day(5), day(7), day(9)].into_iter().collect();
        assert_eq!(active_streak(&every_other, day(9)), 3);
        assert_eq!(active_streak(&every_other, day(10)), 3);

        let mixed: BTreeSet<NaiveDate> =
            [day(2), day(4), day(5), day(7), day(8)].into_iter().collect();
        assert_eq!(active_streak(&mixed, day(9)), 5);

        assert_eq!(active_streak(&BTreeSet::new(), day(9)), 0);
    }

    #[test]
    fn computes_balance_for_window() {
        let events = vec![
            event(8, 9, Some("health")),
            event(8, 18, Some("health")),
            event(9, 9, Some("health")),
            event(9, 10, Some("work")),
        ];

        let balance = compute_balance(&events, 14, day(9));

        assert_eq!(balance.total_events, 4);
        assert_eq!(balance.spheres[0].sphere, "health");
        assert_eq!(balance.spheres[0].count, 3);
        assert_eq!(balance.spheres[1].weight, 0.25);
        assert_eq!(balance.balance_score, 81);
        assert_eq!(balance.streak, 2);
        assert_eq!(balance.adherence, 0.14);
        assert_eq!(balance.last_active_at, Some(events[3].occurred_at));
    }

    #[test]
    fn empty_window_is_all_zero() {
        assert_eq!(compute_balance(&[], 30, day(9)), Balance::empty(30));
    }

    #[test]
    fn window_falls_back_to_default() {
        assert_eq!(window_days(Some("30")), 30);
        assert_eq!(window_days(Some("7")), 14);
        assert_eq!(window_days(Some("abc")), 14);
        assert_eq!(window_days(None), 14);
    }

    #[test]
    fn groups_calendar_by_day() {
        let events = vec![
            event(9, 9, Some("work")),
            event(8, 9, Some("health")),
            event(9, 12, Some("health")),
            event(9, 13, None),
        ];

        let calendar = compute_calendar(&events);

        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar[0].date, day(8));
        assert_eq!(calendar[1].events, 3);
        assert_eq!(calendar[1].spheres, vec!["health".to_string(), "work".to_string()]);
    }
}
