//! AI insight message models.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use crate::model::ai::{
    ActivitySnapshotDto, AiMessageDto, GoalProgressDto, GoalsSnapshotDto, InsightStatsDto,
    InsightsResponseDto, PatternsSnapshotDto, UserAnalyticsDto, UserSnapshotDto,
};

/// Category of an insight message; decides prompt, temperature and fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Celebration,
    Insight,
    Motivation,
    Recommendation,
    Challenge,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celebration => "celebration",
            Self::Insight => "insight",
            Self::Motivation => "motivation",
            Self::Recommendation => "recommendation",
            Self::Challenge => "challenge",
        }
    }

    /// Sampling temperature used when phrasing this kind.
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Celebration => 0.8,
            Self::Insight => 0.5,
            Self::Motivation | Self::Challenge => 0.7,
            Self::Recommendation => 0.6,
        }
    }

    /// Canned text stored when the language model cannot be reached.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::Celebration => "🎉 Great work! Keep it up!",
            Self::Insight => "📊 There is an interesting pattern in your activity!",
            Self::Motivation => {
                "💪 Time to get back to your goals! Even a small step is progress."
            }
            Self::Recommendation => "💡 Try focusing on your priority goals.",
            Self::Challenge => "🏆 Ready for a new challenge? Let's raise the bar!",
        }
    }
}

/// A message the rule engine wants to show, before it is phrased.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageTemplate {
    pub kind: MessageKind,
    /// 1 to 5, higher is shown first.
    pub priority: i32,
    pub emoji: &'static str,
    /// Factual description handed to the language model.
    pub context: String,
    pub expires_in_hours: Option<i64>,
}

/// A phrased message ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAiMessage {
    pub user_id: i32,
    pub kind: String,
    pub priority: i32,
    pub message: String,
    pub emoji: String,
    pub metadata: Option<Value>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewAiMessage {
    pub fn from_template(
        user_id: i32,
        template: &MessageTemplate,
        message: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            kind: template.kind.as_str().to_string(),
            priority: template.priority,
            message,
            emoji: template.emoji.to_string(),
            metadata: Some(json!({ "context": template.context })),
            expires_at: template
                .expires_in_hours
                .map(|hours| now + Duration::hours(hours)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiMessage {
    pub id: i32,
    pub user_id: i32,
    pub kind: String,
    pub priority: i32,
    pub message: String,
    pub emoji: String,
    pub metadata: Option<Value>,
    pub shown: bool,
    pub dismissed: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AiMessage {
    pub fn from_entity(entity: entity::ai_message::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            priority: entity.priority,
            message: entity.message,
            emoji: entity.emoji,
            metadata: entity.metadata,
            shown: entity.shown,
            dismissed: entity.dismissed,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        }
    }

    pub fn into_dto(self) -> AiMessageDto {
        AiMessageDto {
            id: self.id,
            kind: self.kind,
            priority: self.priority,
            message: self.message,
            emoji: self.emoji,
            metadata: self.metadata,
            shown: self.shown,
            dismissed: self.dismissed,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// Why insight generation was requested outside of a regular fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationTrigger {
    GoalCompleted,
    MilestoneReached,
    NewStreakRecord,
    StepAdded,
}

impl GenerationTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalCompleted => "goal_completed",
            Self::MilestoneReached => "milestone_reached",
            Self::NewStreakRecord => "new_streak_record",
            Self::StepAdded => "step_added",
        }
    }

    /// Important triggers regenerate regardless of when messages were last created.
    pub fn is_important(&self) -> bool {
        !matches!(self, Self::StepAdded)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSnapshot {
    pub id: i32,
    /// Whole days since signup.
    pub days_active: i64,
    /// Time of the most recent step.
    pub last_active_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GoalsSnapshot {
    pub total: u32,
    pub active: u32,
    pub completed: u32,
    pub completed_by_sphere: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityStats {
    pub streak: i32,
    pub longest_streak: i32,
    pub avg_steps_per_day: f64,
    pub total_steps: u32,
    pub last_step_date: Option<DateTime<Utc>>,
    /// 999 when no step was ever logged.
    pub days_since_last_step: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Patterns {
    /// English weekday name, e.g. `Monday`.
    pub most_active_day: Option<String>,
    /// UTC hour 0 to 23.
    pub most_active_hour: Option<u32>,
    /// Mean days from creation to completion.
    pub avg_goal_duration: f64,
    /// Completed share of all goals in percent.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub goal_id: i32,
    pub title: String,
    pub sphere: Option<String>,
    /// Percent, capped at 100.
    pub progress: f64,
    pub current_value: f64,
    pub target_value: f64,
    /// Value per active day.
    pub velocity: f64,
    pub days_active: i64,
    pub days_since_last_step: i64,
    pub days_to_complete: Option<i64>,
    pub is_stagnant: bool,
    pub is_rushing: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl GoalProgress {
    pub fn into_dto(self) -> GoalProgressDto {
        GoalProgressDto {
            goal_id: self.goal_id,
            title: self.title,
            sphere: self.sphere,
            progress: self.progress,
            current_value: self.current_value,
            target_value: self.target_value,
            velocity: self.velocity,
            days_active: self.days_active,
            days_since_last_step: self.days_since_last_step,
            days_to_complete: self.days_to_complete,
            is_stagnant: self.is_stagnant,
            is_rushing: self.is_rushing,
            completed_at: self.completed_at,
        }
    }
}

/// Snapshot of a user's goals and activity that drives insight templates.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAnalytics {
    pub user: UserSnapshot,
    pub goals: GoalsSnapshot,
    pub activity: ActivityStats,
    pub patterns: Patterns,
    /// Ten newest goals.
    pub recent_goals: Vec<GoalProgress>,
}

impl UserAnalytics {
    /// Mean progress of the recent goals, two decimals.
    pub fn total_progress(&self) -> f64 {
        if self.recent_goals.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.recent_goals.iter().map(|g| g.progress).sum();
        round2(sum / self.recent_goals.len() as f64)
    }

    pub fn stats(&self) -> InsightStats {
        InsightStats {
            streak: self.activity.streak,
            total_progress: self.total_progress(),
            active_goals: self.goals.active,
        }
    }

    pub fn into_dto(self) -> UserAnalyticsDto {
        UserAnalyticsDto {
            user: UserSnapshotDto {
                id: self.user.id,
                days_active: self.user.days_active,
                last_active_date: self.user.last_active_date,
            },
            goals: GoalsSnapshotDto {
                total: self.goals.total,
                active: self.goals.active,
                completed: self.goals.completed,
                completed_by_sphere: self.goals.completed_by_sphere,
            },
            activity: ActivitySnapshotDto {
                streak: self.activity.streak,
                longest_streak: self.activity.longest_streak,
                avg_steps_per_day: self.activity.avg_steps_per_day,
                total_steps: self.activity.total_steps,
                last_step_date: self.activity.last_step_date,
                days_since_last_step: self.activity.days_since_last_step,
            },
            patterns: PatternsSnapshotDto {
                most_active_day: self.patterns.most_active_day,
                most_active_hour: self.patterns.most_active_hour,
                avg_goal_duration: self.patterns.avg_goal_duration,
                completion_rate: self.patterns.completion_rate,
            },
            recent_goals: self
                .recent_goals
                .into_iter()
                .map(GoalProgress::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightStats {
    pub streak: i32,
    pub total_progress: f64,
    pub active_goals: u32,
}

/// Active messages together with headline stats.
#[derive(Debug, Clone)]
pub struct Insights {
    pub messages: Vec<AiMessage>,
    pub stats: InsightStats,
}

impl Insights {
    pub fn into_dto(self) -> InsightsResponseDto {
        InsightsResponseDto {
            messages: self.messages.into_iter().map(AiMessage::into_dto).collect(),
            stats: InsightStatsDto {
                streak: self.stats.streak,
                total_progress: self.stats.total_progress,
                active_goals: self.stats.active_goals,
            },
        }
    }
}

/// Rounds to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
