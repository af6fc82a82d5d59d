//! Builds the [`UserAnalytics`] snapshot from a user's goals and steps.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::server::model::{
    ai::{
        round2, ActivityStats, GoalProgress, GoalsSnapshot, Patterns, UserAnalytics,
        UserSnapshot,
    },
    goal::{Goal, Step},
    user::User,
};

/// Days since last step reported when nothing was ever logged.
pub const NO_ACTIVITY_DAYS: i64 = 999;
const RECENT_GOALS: usize = 10;
pub const DEFAULT_TARGET: f64 = 100.0;
const STAGNANT_AFTER_DAYS: i64 = 7;
/// Nominal goal length used to judge whether progress is unusually fast.
const EXPECTED_GOAL_DAYS: f64 = 30.0;

fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Key with the highest count; ties go to the smallest key.
fn most_frequent<K: Ord + Copy>(counts: &BTreeMap<K, u32>) -> Option<K> {
    counts
        .iter()
        .max_by(|(ka, a), (kb, b)| a.cmp(b).then_with(|| kb.cmp(ka)))
        .map(|(k, _)| *k)
}

/// Computes the snapshot.
///
/// # Arguments
/// - `user` - Owner of the data, provides signup time and streaks
/// - `goals` - All goals of the user, newest first
/// - `steps` - All steps on those goals, newest first
/// - `now` - Reference time
pub fn build(user: &User, goals: &[Goal], steps: &[Step], now: DateTime<Utc>) -> UserAnalytics {
    let last_step = steps.iter().map(|s| s.created_at).max();
    let days_since_last_step = last_step
        .map(|at| whole_days(at, now))
        .unwrap_or(NO_ACTIVITY_DAYS);
    let days_since_signup = whole_days(user.created_at, now);

    UserAnalytics {
        user: UserSnapshot {
            id: user.id,
            days_active: days_since_signup,
            last_active_date: last_step,
        },
        goals: goals_snapshot(goals),
        activity: ActivityStats {
            streak: user.current_streak,
            longest_streak: user.longest_streak,
            avg_steps_per_day: round2(steps.len() as f64 / days_since_signup.max(1) as f64),
            total_steps: steps.len() as u32,
            last_step_date: last_step,
            days_since_last_step,
        },
        patterns: patterns(goals, steps),
        recent_goals: goals
            .iter()
            .take(RECENT_GOALS)
            .map(|goal| goal_progress(goal, steps, now))
            .collect(),
    }
}

fn goals_snapshot(goals: &[Goal]) -> GoalsSnapshot {
    let mut snapshot = GoalsSnapshot {
        total: goals.len() as u32,
        ..Default::default()
    };

    for goal in goals {
        if goal.is_completed() {
            snapshot.completed += 1;
            if let Some(sphere) = &goal.sphere {
                *snapshot
                    .completed_by_sphere
                    .entry(sphere.clone())
                    .or_insert(0) += 1;
            }
        } else {
            snapshot.active += 1;
        }
    }

    snapshot
}

fn patterns(goals: &[Goal], steps: &[Step]) -> Patterns {
    let mut days: BTreeMap<u32, u32> = BTreeMap::new();
    let mut hours: BTreeMap<u32, u32> = BTreeMap::new();
    for step in steps {
        *days
            .entry(step.created_at.weekday().num_days_from_monday())
            .or_insert(0) += 1;
        *hours.entry(step.created_at.hour()).or_insert(0) += 1;
    }

    let durations: Vec<f64> = goals
        .iter()
        .filter_map(|g| g.completed_at.map(|done| done - g.created_at))
        .map(|span| span.num_seconds() as f64 / 86_400.0)
        .collect();
    let avg_goal_duration = if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    };
    let completion_rate = if goals.is_empty() {
        0.0
    } else {
        durations.len() as f64 / goals.len() as f64 * 100.0
    };

    Patterns {
        most_active_day: most_frequent(&days)
            .and_then(|i| WEEKDAYS.get(i as usize))
            .map(|d| d.to_string()),
        most_active_hour: most_frequent(&hours),
        avg_goal_duration: round2(avg_goal_duration),
        completion_rate: round2(completion_rate),
    }
}

fn goal_progress(goal: &Goal, steps: &[Step], now: DateTime<Utc>) -> GoalProgress {
    let goal_steps: Vec<&Step> = steps.iter().filter(|s| s.goal_id == goal.id).collect();
    let current_value: f64 = goal_steps.iter().map(|s| s.value.unwrap_or(0.0)).sum();
    let target_value = goal.target_value.unwrap_or(DEFAULT_TARGET);

    let progress = if target_value > 0.0 {
        (current_value / target_value * 100.0).min(100.0)
    } else {
        0.0
    };
    let days_active = whole_days(goal.created_at, now).max(1);
    let days_since_last_step = goal_steps
        .iter()
        .map(|s| s.created_at)
        .max()
        .map(|at| whole_days(at, now))
        .unwrap_or(NO_ACTIVITY_DAYS);

    let velocity = current_value / days_active as f64;
    let remaining = (target_value - current_value).max(0.0);
    let days_to_complete = (velocity > 0.0 && remaining > 0.0)
        .then(|| (remaining / velocity).ceil() as i64);
    let expected_progress = days_active as f64 / EXPECTED_GOAL_DAYS * 100.0;

    GoalProgress {
        goal_id: goal.id,
        title: goal.title.clone(),
        sphere: goal.sphere.clone(),
        progress: round2(progress),
        current_value,
        target_value,
        velocity: round2(velocity),
        days_active,
        days_since_last_step,
        days_to_complete,
        is_stagnant: days_since_last_step >= STAGNANT_AFTER_DAYS,
        is_rushing: progress > expected_progress * 1.5,
        completed_at: goal.completed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        // A Tuesday
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn user() -> User {
        User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: String::new(),
            name: "A".to_string(),
            avatar_url: None,
            bio: None,
            current_streak: 2,
            longest_streak: 5,
            last_active_date: None,
            created_at: now() - Duration::days(20),
        }
    }

    fn goal(id: i32, days_ago: i64, target: Option<f64>) -> Goal {
        Goal {
            id,
            user_id: 1,
            title: format!("Goal {}", id),
            description: None,
            sphere: Some("health".to_string()),
            privacy: "private".to_string(),
            progress_type: "quantity".to_string(),
            target_value: target,
            created_at: now() - Duration::days(days_ago),
            completed_at: None,
        }
    }

    fn step(goal_id: i32, value: f64, at: DateTime<Utc>) -> Step {
        Step {
            id: 0,
            goal_id,
            value: Some(value),
            note: None,
            created_at: at,
        }
    }

    #[test]
    fn computes_goal_progress() {
        let goals = vec![goal(1, 10, Some(40.0))];
        let steps = vec![
            step(1, 6.0, now() - Duration::days(8)),
            step(1, 4.0, now() - Duration::days(8) + Duration::hours(1)),
        ];

        let analytics = build(&user(), &goals, &steps, now());
        let progress = &analytics.recent_goals[0];

        assert_eq!(progress.current_value, 10.0);
        assert_eq!(progress.progress, 25.0);
        assert_eq!(progress.velocity, 1.0);
        assert_eq!(progress.days_to_complete, Some(30));
        assert_eq!(progress.days_since_last_step, 7);
        assert!(progress.is_stagnant);
        assert!(!progress.is_rushing);
    }

    #[test]
    fn defaults_target_and_flags_rushing() {
        let goals = vec![goal(1, 2, None)];
        let steps = vec![step(1, 30.0, now() - Duration::hours(1))];

        let analytics = build(&user(), &goals, &steps, now());
        let progress = &analytics.recent_goals[0];

        assert_eq!(progress.target_value, 100.0);
        assert_eq!(progress.progress, 30.0);
        assert!(progress.is_rushing);
        assert!(!progress.is_stagnant);
    }

    #[test]
    fn computes_activity_and_patterns() {
        let mut done = goal(2, 6, None);
        done.completed_at = Some(now() - Duration::days(2));
        let goals = vec![goal(1, 1, None), done];
        let monday_9 = Utc.with_ymd_and_hms(2026, 3, 9, 9, 0, 0).unwrap();
        let steps = vec![
            step(1, 1.0, monday_9),
            step(1, 1.0, monday_9 + Duration::minutes(30)),
            step(2, 1.0, Utc.with_ymd_and_hms(2026, 3, 7, 18, 0, 0).unwrap()),
        ];

        let analytics = build(&user(), &goals, &steps, now());

        assert_eq!(analytics.goals.total, 2);
        assert_eq!(analytics.goals.active, 1);
        assert_eq!(analytics.goals.completed_by_sphere.get("health"), Some(&1));
        assert_eq!(analytics.activity.total_steps, 3);
        assert_eq!(analytics.activity.avg_steps_per_day, 0.15);
        assert_eq!(analytics.activity.days_since_last_step, 1);
        assert_eq!(analytics.patterns.most_active_day.as_deref(), Some("Monday"));
        assert_eq!(analytics.patterns.most_active_hour, Some(9));
        assert_eq!(analytics.patterns.avg_goal_duration, 4.0);
        assert_eq!(analytics.patterns.completion_rate, 50.0);
    }

    #[test]
    fn reports_no_activity() {
        let analytics = build(&user(), &[], &[], now());

        assert_eq!(analytics.activity.days_since_last_step, NO_ACTIVITY_DAYS);
        assert!(analytics.patterns.most_active_day.is_none());
        assert_eq!(analytics.total_progress(), 0.0);
    }
}
