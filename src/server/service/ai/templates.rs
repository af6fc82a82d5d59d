//! Rules that decide which insight messages a user should see.
//!
//! Each rule inspects the analytics snapshot and may produce a [`MessageTemplate`] whose
//! context is a plain factual description. The language model only phrases that context.

use chrono::{DateTime, Duration, Utc};

use crate::server::model::ai::{MessageKind, MessageTemplate, UserAnalytics};

pub const MAX_TEMPLATES: usize = 5;
const EXPECTED_GOAL_DAYS: i64 = 30;

fn template(
    kind: MessageKind,
    priority: i32,
    emoji: &'static str,
    context: String,
    expires_in_hours: i64,
) -> MessageTemplate {
    MessageTemplate {
        kind,
        priority,
        emoji,
        context,
        expires_in_hours: Some(expires_in_hours),
    }
}

/// Runs every rule group and keeps the highest priority templates.
///
/// Templates with equal priority keep rule order.
pub fn build(analytics: &UserAnalytics, now: DateTime<Utc>) -> Vec<MessageTemplate> {
    let mut templates = Vec::new();
    templates.extend(celebrations(analytics, now));
    templates.extend(patterns(analytics));
    templates.extend(motivation(analytics));
    templates.extend(recommendations(analytics));
    templates.extend(challenges(analytics));

    templates.sort_by(|a, b| b.priority.cmp(&a.priority));
    templates.truncate(MAX_TEMPLATES);
    templates
}

fn celebrations(analytics: &UserAnalytics, now: DateTime<Utc>) -> Vec<MessageTemplate> {
    let mut out = Vec::new();
    let activity = &analytics.activity;

    if activity.streak >= 3 && activity.streak == activity.longest_streak {
        out.push(template(
            MessageKind::Celebration,
            5,
            "🔥",
            format!(
                "The user set a new streak record: {} days in a row with progress. This is their personal best!",
                activity.streak
            ),
            24,
        ));
    }

    for goal in &analytics.recent_goals {
        let Some(done) = goal.completed_at else {
            continue;
        };
        if now - done >= Duration::hours(24) {
            continue;
        }

        let faster = if goal.days_active < EXPECTED_GOAL_DAYS {
            format!(
                ", {} days faster than expected",
                EXPECTED_GOAL_DAYS - goal.days_active
            )
        } else {
            String::new()
        };
        out.push(template(
            MessageKind::Celebration,
            5,
            "🎉",
            format!(
                "The user completed the goal \"{}\". It took {} days{}. Sphere: {}.",
                goal.title,
                goal.days_active,
                faster,
                goal.sphere.as_deref().unwrap_or("not set")
            ),
            48,
        ));
    }

    if let Some(goal) = analytics
        .recent_goals
        .iter()
        .find(|g| g.progress >= 50.0 && g.progress < 55.0)
    {
        let remaining = goal
            .days_to_complete
            .map(|d| d.to_string())
            .unwrap_or_else(|| "a few".to_string());
        out.push(template(
            MessageKind::Celebration,
            4,
            "🎯",
            format!(
                "The user reached 50% on the goal \"{}\". Current progress: {}/{}. About {} days to go.",
                goal.title, goal.current_value, goal.target_value, remaining
            ),
            24,
        ));
    }

    out
}

fn patterns(analytics: &UserAnalytics) -> Vec<MessageTemplate> {
    let mut out = Vec::new();
    let activity = &analytics.activity;

    if let Some(hour) = analytics.patterns.most_active_hour {
        if activity.total_steps > 10 {
            out.push(template(
                MessageKind::Insight,
                3,
                "📊",
                format!(
                    "The user logs most steps around {}:00. Total steps: {}. Average activity: {:.1} steps per day.",
                    hour, activity.total_steps, activity.avg_steps_per_day
                ),
                72,
            ));
        }
    }

    if let Some(day) = &analytics.patterns.most_active_day {
        out.push(template(
            MessageKind::Insight,
            2,
            "📅",
            format!(
                "The most productive weekday is {}. The user logs steps most often on this day.",
                day
            ),
            72,
        ));
    }

    let best_sphere = analytics
        .goals
        .completed_by_sphere
        .iter()
        .max_by(|(sa, a), (sb, b)| a.cmp(b).then_with(|| sb.cmp(sa)));
    if let Some((sphere, count)) = best_sphere {
        if *count >= 2 {
            out.push(template(
                MessageKind::Insight,
                3,
                "🎯",
                format!(
                    "In the sphere \"{}\" the user completed {} goals, more than in any other. Completion rate: {:.0}%.",
                    sphere, count, analytics.patterns.completion_rate
                ),
                96,
            ));
        }
    }

    if activity.avg_steps_per_day > 2.0 && activity.streak >= 5 {
        out.push(template(
            MessageKind::Insight,
            3,
            "📈",
            format!(
                "Strong momentum: {:.1} steps per day on average and a current streak of {} days.",
                activity.avg_steps_per_day, activity.streak
            ),
            48,
        ));
    }

    out
}

fn motivation(analytics: &UserAnalytics) -> Vec<MessageTemplate> {
    let mut out = Vec::new();
    let activity = &analytics.activity;
    let active_goals = analytics.goals.active;

    if (3..30).contains(&activity.days_since_last_step) && activity.total_steps > 0 {
        let priority = if activity.days_since_last_step >= 7 { 4 } else { 3 };
        out.push(template(
            MessageKind::Motivation,
            priority,
            "💪",
            format!(
                "The user has not logged a step for {} days. They have {} active goals. Their best streak was {} days.",
                activity.days_since_last_step, active_goals, activity.longest_streak
            ),
            24,
        ));
    }

    if activity.total_steps == 0 && active_goals > 0 {
        out.push(template(
            MessageKind::Motivation,
            5,
            "🚀",
            format!(
                "The user just created {} {} but has not logged a single step yet. This is day one. Suggest how to get started.",
                active_goals,
                if active_goals == 1 { "goal" } else { "goals" }
            ),
            48,
        ));
        return out;
    }

    if let Some(goal) = analytics
        .recent_goals
        .iter()
        .find(|g| g.is_stagnant && g.progress > 0.0 && g.progress < 100.0)
    {
        out.push(template(
            MessageKind::Motivation,
            3,
            "⏰",
            format!(
                "The goal \"{}\" has had no progress for {} days. Progress: {}/{} ({:.0}%). Remaining: {:.0}.",
                goal.title,
                goal.days_since_last_step,
                goal.current_value,
                goal.target_value,
                goal.progress,
                goal.target_value - goal.current_value
            ),
            48,
        ));
    }

    if activity.longest_streak > 5 && activity.streak == 0 && activity.total_steps > 0 {
        out.push(template(
            MessageKind::Motivation,
            4,
            "🔥",
            format!(
                "The user's record streak was {} days but the current streak is gone. The last step was {} days ago.",
                activity.longest_streak, activity.days_since_last_step
            ),
            48,
        ));
    }

    out
}

fn recommendations(analytics: &UserAnalytics) -> Vec<MessageTemplate> {
    let mut out = Vec::new();
    let activity = &analytics.activity;
    let active_goals = analytics.goals.active;

    if active_goals > 5 {
        let with_progress = analytics
            .recent_goals
            .iter()
            .filter(|g| g.progress > 0.0 && g.progress < 100.0)
            .count();
        if (with_progress as f64) < active_goals as f64 * 0.5 {
            out.push(template(
                MessageKind::Recommendation,
                4,
                "🤔",
                format!(
                    "The user has {} active goals but progress on only {}. Average activity: {:.1} steps per day.",
                    active_goals, with_progress, activity.avg_steps_per_day
                ),
                72,
            ));
        }
    }

    if let Some(goal) = analytics.recent_goals.iter().find(|g| g.is_rushing) {
        out.push(template(
            MessageKind::Recommendation,
            2,
            "💡",
            format!(
                "The goal \"{}\" is moving faster than planned: {:.1} per day, {:.0}% done. The user may finish early.",
                goal.title, goal.velocity, goal.progress
            ),
            72,
        ));
    }

    if activity.avg_steps_per_day < 1.0 && activity.total_steps > 5 {
        out.push(template(
            MessageKind::Recommendation,
            3,
            "📅",
            format!(
                "The user logs steps irregularly: {:.1} steps per day on average. Total steps: {}. Active goals: {}.",
                activity.avg_steps_per_day, activity.total_steps, active_goals
            ),
            96,
        ));
    }

    out
}

fn challenges(analytics: &UserAnalytics) -> Vec<MessageTemplate> {
    let mut out = Vec::new();
    let activity = &analytics.activity;

    if (5..14).contains(&activity.streak) {
        out.push(template(
            MessageKind::Challenge,
            2,
            "🏆",
            format!(
                "Current streak: {} days. Suggest a challenge to reach 14 days. The user's record is {} days.",
                activity.streak, activity.longest_streak
            ),
            168,
        ));
    }

    let near_complete: Vec<String> = analytics
        .recent_goals
        .iter()
        .filter(|g| g.progress >= 80.0 && g.progress < 100.0)
        .map(|g| format!("\"{}\" ({:.0}%)", g.title, g.progress))
        .collect();
    if near_complete.len() >= 3 {
        out.push(template(
            MessageKind::Challenge,
            3,
            "⚡",
            format!(
                "{} goals are close to completion (80%+): {}.",
                near_complete.len(),
                near_complete.join(", ")
            ),
            168,
        ));
    }

    if activity.streak > 0 && analytics.goals.active > 0 {
        out.push(template(
            MessageKind::Challenge,
            2,
            "🎯",
            format!(
                "Current streak: {} days. Active goals: {}. Suggest logging one step on every goal today.",
                activity.streak, analytics.goals.active
            ),
            24,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::ai::{
        ActivityStats, GoalProgress, GoalsSnapshot, Patterns, UserSnapshot,
    };
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    fn analytics() -> UserAnalytics {
        UserAnalytics {
            user: UserSnapshot {
                id: 1,
                days_active: 30,
                last_active_date: None,
            },
            goals: GoalsSnapshot::default(),
            activity: ActivityStats {
                streak: 0,
                longest_streak: 0,
                avg_steps_per_day: 0.0,
                total_steps: 0,
                last_step_date: None,
                days_since_last_step: 999,
            },
            patterns: Patterns {
                most_active_day: None,
                most_active_hour: None,
                avg_goal_duration: 0.0,
                completion_rate: 0.0,
            },
            recent_goals: Vec::new(),
        }
    }

    fn progress(id: i32, progress: f64) -> GoalProgress {
        GoalProgress {
            goal_id: id,
            title: format!("Goal {}", id),
            sphere: None,
            progress,
            current_value: progress,
            target_value: 100.0,
            velocity: 1.0,
            days_active: 10,
            days_since_last_step: 1,
            days_to_complete: None,
            is_stagnant: false,
            is_rushing: false,
            completed_at: None,
        }
    }

    #[test]
    fn newcomer_stops_further_motivation() {
        let mut a = analytics();
        a.goals.active = 1;
        let mut stagnant = progress(1, 10.0);
        stagnant.is_stagnant = true;
        a.recent_goals.push(stagnant);

        let templates = build(&a, now());

        let motivation: Vec<_> = templates
            .iter()
            .filter(|t| t.kind == MessageKind::Motivation)
            .collect();
        assert_eq!(motivation.len(), 1);
        assert_eq!(motivation[0].priority, 5);
        assert_eq!(motivation[0].emoji, "🚀");
    }

    #[test]
    fn streak_record_and_recent_completion_celebrate() {
        let mut a = analytics();
        a.activity.streak = 4;
        a.activity.longest_streak = 4;
        a.activity.total_steps = 4;
        a.activity.days_since_last_step = 0;
        let mut done = progress(1, 100.0);
        done.completed_at = Some(now() - Duration::hours(2));
        a.recent_goals.push(done);

        let templates = build(&a, now());

        let celebrations = templates
            .iter()
            .filter(|t| t.kind == MessageKind::Celebration)
            .count();
        assert_eq!(celebrations, 2);
        assert_eq!(templates[0].priority, 5);
        assert!(templates[1].context.contains("20 days faster"));
    }

    #[test]
    fn idle_user_gets_urgent_nudge() {
        let mut a = analytics();
        a.activity.total_steps = 3;
        a.activity.days_since_last_step = 8;
        a.activity.longest_streak = 7;

        let templates = build(&a, now());

        let nudge = templates
            .iter()
            .find(|t| t.emoji == "💪")
            .expect("idle nudge");
        assert_eq!(nudge.priority, 4);
        assert!(templates.iter().any(|t| t.context.contains("record streak was 7")));
    }

    #[test]
    fn keeps_top_five_by_priority() {
        let mut a = analytics();
        a.activity.streak = 6;
        a.activity.longest_streak = 6;
        a.activity.total_steps = 40;
        a.activity.avg_steps_per_day = 3.0;
        a.activity.days_since_last_step = 0;
        a.goals.active = 3;
        a.patterns.most_active_hour = Some(8);
        a.patterns.most_active_day = Some("Monday".to_string());
        a.recent_goals = vec![progress(1, 85.0), progress(2, 90.0), progress(3, 52.0)];

        let templates = build(&a, now());

        assert_eq!(templates.len(), MAX_TEMPLATES);
        assert!(templates.windows(2).all(|w| w[0].priority >= w[1].priority));
        assert_eq!(templates[0].kind, MessageKind::Celebration);
    }
}
