//! Achievement unlock rules.
//!
//! A catalogue row stores its rule as a `kind` plus a JSON `requirement`. [`Rule::parse`]
//! turns that pair into a typed rule which is then evaluated against an
//! [`ActivitySnapshot`] of the user's goals and steps. Malformed requirements parse into
//! [`Rule::Never`] so a bad catalogue row can never unlock anything.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Timelike, Utc, Weekday};
use serde_json::Value;

use crate::server::model::goal::{Goal, Step};

/// Everything the rules need to know about a user.
#[derive(Debug, Clone, Default)]
pub struct ActivitySnapshot {
    pub goals: Vec<Goal>,
    pub steps: Vec<Step>,
    pub current_streak: i32,
    /// Number of achievements the user already holds.
    pub held: usize,
}

impl ActivitySnapshot {
    fn goal_count(&self) -> u64 {
        self.goals.len() as u64
    }

    fn completed(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| g.is_completed())
    }

    fn completed_count(&self) -> u64 {
        self.completed().count() as u64
    }

    fn sphere_goal_count(&self, sphere: &str) -> u64 {
        self.goals
            .iter()
            .filter(|g| g.sphere.as_deref() == Some(sphere))
            .count() as u64
    }

    fn sphere_completed_count(&self, sphere: &str) -> u64 {
        self.completed()
            .filter(|g| g.sphere.as_deref() == Some(sphere))
            .count() as u64
    }

    fn step_sums(&self) -> HashMap<i32, f64> {
        let mut sums = HashMap::new();
        for step in &self.steps {
            *sums.entry(step.goal_id).or_insert(0.0) += step.value.unwrap_or(0.0);
        }
        sums
    }

    /// Completed goals as `(created_at, completed_at)` pairs.
    fn completion_spans(&self) -> impl Iterator<Item = (DateTime<Utc>, DateTime<Utc>)> + '_ {
        self.goals
            .iter()
            .filter_map(|g| g.completed_at.map(|done| (g.created_at, done)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    GoalCount(u64),
    Completion(u64),
    Streak(u64),
    SphereGoal { sphere: String, count: u64 },
    SphereCompletion { sphere: String, count: u64 },
    StepsCount(u64),
    Meta(u64),
    /// A step logged between 00:00 and 06:00 UTC.
    EarlyMorning,
    /// A step logged at or after 23:00 UTC.
    LateNight,
    WeekendCompletions(u64),
    FastCompletion { days: i64 },
    LongGoal { days: i64 },
    ActiveGoals(u64),
    /// Completed goals whose logged step total reached the target.
    PerfectCompletions(u64),
    /// A goal created on the given month and day.
    CreatedOn { month: u32, day: u32 },
    Never,
}

fn positive(requirement: &Value, key: &str) -> Option<u64> {
    requirement
        .get(key)
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)
}

fn text<'v>(requirement: &'v Value, key: &str) -> Option<&'v str> {
    requirement.get(key).and_then(Value::as_str)
}

impl Rule {
    pub fn parse(kind: &str, requirement: Option<&Value>) -> Rule {
        let Some(req) = requirement else {
            return Rule::Never;
        };

        let rule = match kind {
            "goal_count" => positive(req, "count").map(Rule::GoalCount),
            "completion" => positive(req, "count").map(Rule::Completion),
            "streak" => positive(req, "days").map(Rule::Streak),
            "sphere_goal" => text(req, "sphere").zip(positive(req, "count")).map(
                |(sphere, count)| Rule::SphereGoal {
                    sphere: sphere.to_string(),
                    count,
                },
            ),
            "sphere_completion" => text(req, "sphere").zip(positive(req, "count")).map(
                |(sphere, count)| Rule::SphereCompletion {
                    sphere: sphere.to_string(),
                    count,
                },
            ),
            "steps_count" => positive(req, "count").map(Rule::StepsCount),
            "meta" => positive(req, "achievements").map(Rule::Meta),
            "special" => Self::parse_special(req),
            "holiday" => Self::parse_holiday(req),
            _ => None,
        };

        rule.unwrap_or(Rule::Never)
    }

    fn parse_special(req: &Value) -> Option<Rule> {
        match text(req, "type") {
            Some("early_morning") => Some(Rule::EarlyMorning),
            Some("late_night") => Some(Rule::LateNight),
            Some("weekend_completions") => positive(req, "count").map(Rule::WeekendCompletions),
            Some("fast_completion") => {
                positive(req, "days").map(|d| Rule::FastCompletion { days: d as i64 })
            }
            Some("long_goal") => positive(req, "days").map(|d| Rule::LongGoal { days: d as i64 }),
            Some("active_goals") => positive(req, "count").map(Rule::ActiveGoals),
            Some("perfect_completions") => positive(req, "count").map(Rule::PerfectCompletions),
            Some(_) => None,
            // Older catalogue rows
            None => match text(req, "time") {
                Some("before_6am") => Some(Rule::EarlyMorning),
                Some("after_11pm") => Some(Rule::LateNight),
                _ if req.get("weekend").and_then(Value::as_bool) == Some(true) => {
                    Some(Rule::WeekendCompletions(1))
                }
                _ => None,
            },
        }
    }

    /// Only fixed calendar dates are supported; birthdays are not on record.
    fn parse_holiday(req: &Value) -> Option<Rule> {
        let (month, day) = text(req, "date")?.split_once('-')?;
        let month: u32 = month.parse().ok()?;
        let day: u32 = day.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        Some(Rule::CreatedOn { month, day })
    }

    pub fn is_satisfied(&self, snapshot: &ActivitySnapshot) -> bool {
        match self {
            Rule::GoalCount(n) => snapshot.goal_count() >= *n,
            Rule::Completion(n) => snapshot.completed_count() >= *n,
            Rule::Streak(days) => snapshot.current_streak.max(0) as u64 >= *days,
            Rule::SphereGoal { sphere, count } => snapshot.sphere_goal_count(sphere) >= *count,
            Rule::SphereCompletion { sphere, count } => {
                snapshot.sphere_completed_count(sphere) >= *count
            }
            Rule::StepsCount(n) => snapshot.steps.len() as u64 >= *n,
            Rule::Meta(n) => snapshot.held as u64 >= *n,
            Rule::EarlyMorning => snapshot.steps.iter().any(|s| s.created_at.hour() < 6),
            Rule::LateNight => snapshot.steps.iter().any(|s| s.created_at.hour() >= 23),
            Rule::WeekendCompletions(n) => {
                let weekend = snapshot
                    .completion_spans()
                    .filter(|(_, done)| matches!(done.weekday(), Weekday::Sat | Weekday::Sun))
                    .count() as u64;
                weekend >= *n
            }
            Rule::FastCompletion { days } => snapshot
                .completion_spans()
                .any(|(created, done)| done - created <= Duration::days(*days)),
            Rule::LongGoal { days } => snapshot
                .completion_spans()
                .any(|(created, done)| done - created >= Duration::days(*days)),
            Rule::ActiveGoals(n) => {
                let active = snapshot.goals.iter().filter(|g| !g.is_completed()).count() as u64;
                active >= *n
            }
            Rule::PerfectCompletions(n) => {
                let sums = snapshot.step_sums();
                let perfect = snapshot
                    .completed()
                    .filter(|g| match g.target_value {
                        Some(target) if target > 0.0 => {
                            sums.get(&g.id).copied().unwrap_or(0.0) >= target
                        }
                        _ => false,
                    })
                    .count() as u64;
                perfect >= *n
            }
            Rule::CreatedOn { month, day } => snapshot
                .goals
                .iter()
                .any(|g| g.created_at.month() == *month && g.created_at.day() == *day),
            Rule::Never => false,
        }
    }

    /// Progress towards a counting rule in percent; other rules report 0.
    pub fn progress(&self, snapshot: &ActivitySnapshot) -> u8 {
        let (current, required) = match self {
            Rule::GoalCount(n) => (snapshot.goal_count(), *n),
            Rule::Completion(n) => (snapshot.completed_count(), *n),
            Rule::Streak(days) => (snapshot.current_streak.max(0) as u64, *days),
            Rule::SphereGoal { sphere, count } => (snapshot.sphere_goal_count(sphere), *count),
            Rule::SphereCompletion { sphere, count } => {
                (snapshot.sphere_completed_count(sphere), *count)
            }
            Rule::StepsCount(n) => (snapshot.steps.len() as u64, *n),
            Rule::Meta(n) => (snapshot.held as u64, *n),
            _ => return 0,
        };

        percent(current, required)
    }
}

fn percent(current: u64, required: u64) -> u8 {
    if required == 0 {
        return 0;
    }
    let value = (current as f64 / required as f64 * 100.0).round();
    value.min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn goal(id: i32, sphere: Option<&str>, created: DateTime<Utc>, done: Option<DateTime<Utc>>) -> Goal {
        Goal {
            id,
            user_id: 1,
            title: format!("Goal {}", id),
            description: None,
            sphere: sphere.map(str::to_string),
            privacy: "private".to_string(),
            progress_type: "quantity".to_string(),
            target_value: None,
            created_at: created,
            completed_at: done,
        }
    }

    fn step(goal_id: i32, value: f64, created: DateTime<Utc>) -> Step {
        Step {
            id: 0,
            goal_id,
            value: Some(value),
            note: None,
            created_at: created,
        }
    }

    #[test]
    fn missing_or_zero_parameters_never_grant() {
        assert_eq!(Rule::parse("goal_count", Some(&json!({}))), Rule::Never);
        assert_eq!(Rule::parse("goal_count", Some(&json!({ "count": 0 }))), Rule::Never);
        assert_eq!(Rule::parse("streak", None), Rule::Never);
        assert_eq!(Rule::parse("leaderboard", Some(&json!({ "position": 1 }))), Rule::Never);
        assert_eq!(Rule::parse("holiday", Some(&json!({ "type": "birthday" }))), Rule::Never);
        assert_eq!(
            Rule::parse("sphere_goal", Some(&json!({ "count": 2 }))),
            Rule::Never
        );
    }

    #[test]
    fn maps_legacy_special_requirements() {
        assert_eq!(
            Rule::parse("special", Some(&json!({ "time": "before_6am" }))),
            Rule::EarlyMorning
        );
        assert_eq!(
            Rule::parse("special", Some(&json!({ "time": "after_11pm" }))),
            Rule::LateNight
        );
        assert_eq!(
            Rule::parse("special", Some(&json!({ "weekend": true }))),
            Rule::WeekendCompletions(1)
        );
    }

    #[test]
    fn evaluates_counting_rules() {
        let snapshot = ActivitySnapshot {
            goals: vec![
                goal(1, Some("health"), at(2026, 1, 5, 10), Some(at(2026, 1, 6, 10))),
                goal(2, Some("health"), at(2026, 1, 7, 10), None),
                goal(3, Some("work"), at(2026, 1, 8, 10), None),
            ],
            steps: vec![step(1, 1.0, at(2026, 1, 5, 12))],
            current_streak: 4,
            held: 2,
        };

        assert!(Rule::GoalCount(3).is_satisfied(&snapshot));
        assert!(!Rule::GoalCount(4).is_satisfied(&snapshot));
        assert!(Rule::Completion(1).is_satisfied(&snapshot));
        assert!(Rule::Streak(3).is_satisfied(&snapshot));
        assert!(!Rule::Streak(7).is_satisfied(&snapshot));
        assert!(Rule::SphereGoal { sphere: "health".into(), count: 2 }.is_satisfied(&snapshot));
        assert!(!Rule::SphereCompletion { sphere: "work".into(), count: 1 }.is_satisfied(&snapshot));
        assert!(Rule::ActiveGoals(2).is_satisfied(&snapshot));
        assert!(Rule::Meta(2).is_satisfied(&snapshot));
    }

    #[test]
    fn evaluates_time_based_special_rules() {
        let snapshot = ActivitySnapshot {
            goals: vec![
                // Saturday completion, 20 hours after creation
                goal(1, None, at(2026, 1, 9, 14), Some(at(2026, 1, 10, 10))),
                goal(2, None, at(2026, 1, 1, 9), Some(at(2026, 4, 6, 9))),
            ],
            steps: vec![step(1, 1.0, at(2026, 1, 9, 5)), step(2, 1.0, at(2026, 1, 9, 23))],
            ..Default::default()
        };

        assert!(Rule::EarlyMorning.is_satisfied(&snapshot));
        assert!(Rule::LateNight.is_satisfied(&snapshot));
        assert!(Rule::WeekendCompletions(1).is_satisfied(&snapshot));
        assert!(!Rule::WeekendCompletions(2).is_satisfied(&snapshot));
        assert!(Rule::FastCompletion { days: 1 }.is_satisfied(&snapshot));
        assert!(Rule::LongGoal { days: 90 }.is_satisfied(&snapshot));
        assert!(Rule::CreatedOn { month: 1, day: 1 }.is_satisfied(&snapshot));
    }

    #[test]
    fn perfect_completion_requires_target_reached() {
        let mut reached = goal(1, None, at(2026, 1, 1, 9), Some(at(2026, 1, 3, 9)));
        reached.target_value = Some(5.0);
        let mut missed = goal(2, None, at(2026, 1, 1, 9), Some(at(2026, 1, 3, 9)));
        missed.target_value = Some(10.0);

        let snapshot = ActivitySnapshot {
            goals: vec![reached, missed],
            steps: vec![
                step(1, 3.0, at(2026, 1, 2, 9)),
                step(1, 2.0, at(2026, 1, 2, 10)),
                step(2, 4.0, at(2026, 1, 2, 11)),
            ],
            ..Default::default()
        };

        assert!(Rule::PerfectCompletions(1).is_satisfied(&snapshot));
        assert!(!Rule::PerfectCompletions(2).is_satisfied(&snapshot));
    }

    #[test]
    fn progress_is_capped_and_rounded() {
        let snapshot = ActivitySnapshot {
            current_streak: 2,
            held: 30,
            ..Default::default()
        };

        assert_eq!(Rule::Streak(3).progress(&snapshot), 67);
        assert_eq!(Rule::Meta(10).progress(&snapshot), 100);
        assert_eq!(Rule::EarlyMorning.progress(&snapshot), 0);
    }
}
