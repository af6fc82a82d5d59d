//! Analytics event log models.
//!
//! Events are append-only records of user activity used by the insights engine. The
//! event type, sphere and source vocabularies are closed; clients may attach a
//! `client_event_id` to make submissions idempotent.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;

use crate::{
    model::event::{CreateEventDto, EventDto, EventQueryDto},
    server::{
        error::AppError,
        model::goal::{validate_choice, SPHERES},
    },
};

pub const CREATE_GOAL: &str = "create_goal";
pub const UPDATE_GOAL: &str = "update_goal";
pub const DELETE_GOAL: &str = "delete_goal";
pub const COMPLETE_GOAL: &str = "complete_goal";
pub const CREATE_STEP: &str = "create_step";
pub const COMPLETE_STEP: &str = "complete_step";
pub const DELETE_STEP: &str = "delete_step";
pub const CREATE_SUBTASK: &str = "create_subtask";
pub const COMPLETE_SUBTASK: &str = "complete_subtask";
pub const DELETE_SUBTASK: &str = "delete_subtask";

pub const EVENT_TYPES: &[&str] = &[
    CREATE_GOAL,
    UPDATE_GOAL,
    DELETE_GOAL,
    COMPLETE_GOAL,
    CREATE_STEP,
    COMPLETE_STEP,
    DELETE_STEP,
    CREATE_SUBTASK,
    COMPLETE_SUBTASK,
    DELETE_SUBTASK,
    "open_dashboard",
    "view_insight",
    "view_calendar",
    "view_recommendations",
    "unlock_achievement",
    "view_achievement",
    "reminder_created",
    "reminder_fired",
    "reminder_completed",
    "reminder_snoozed",
    "reminder_dismissed",
    "recommendation_shown",
    "recommendation_clicked",
    "recommendation_dismissed",
];

/// Event types that count as real progress for balance and streak calculations.
pub const ACTIVE_EVENT_TYPES: &[&str] = &[
    CREATE_GOAL,
    UPDATE_GOAL,
    COMPLETE_GOAL,
    CREATE_STEP,
    COMPLETE_STEP,
    CREATE_SUBTASK,
    COMPLETE_SUBTASK,
];

pub const SOURCES: &[&str] = &["web", "mobile", "service"];
pub const SOURCE_WEB: &str = "web";

const MAX_CLIENT_EVENT_ID_LEN: usize = 64;
const MAX_FUTURE_SKEW_MINUTES: i64 = 5;
pub const DEFAULT_LIST_LIMIT: u64 = 100;
pub const MAX_LIST_LIMIT: u64 = 500;

/// A single analytics event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub user_id: i32,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: Option<Value>,
    pub client_event_id: Option<String>,
    pub source: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    pub step_id: Option<i32>,
    pub subtask_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            event_type: entity.event_type,
            occurred_at: entity.occurred_at,
            payload: entity.payload,
            client_event_id: entity.client_event_id,
            source: entity.source,
            sphere: entity.sphere,
            goal_id: entity.goal_id,
            step_id: entity.step_id,
            subtask_id: entity.subtask_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> EventDto {
        EventDto {
            id: self.id,
            event_type: self.event_type,
            occurred_at: self.occurred_at,
            payload: self.payload,
            client_event_id: self.client_event_id,
            source: self.source,
            sphere: self.sphere,
            goal_id: self.goal_id,
            step_id: self.step_id,
            subtask_id: self.subtask_id,
        }
    }
}

/// Validated parameters for recording an event.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEventParam {
    pub user_id: i32,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: Option<Value>,
    pub client_event_id: Option<String>,
    pub source: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    pub step_id: Option<i32>,
    pub subtask_id: Option<i32>,
}

impl CreateEventParam {
    /// Minimal event emitted by the server itself on behalf of a user.
    pub fn new(user_id: i32, event_type: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            event_type: event_type.to_string(),
            occurred_at: now,
            payload: None,
            client_event_id: None,
            source: Some(SOURCE_WEB.to_string()),
            sphere: None,
            goal_id: None,
            step_id: None,
            subtask_id: None,
        }
    }

    pub fn sphere(mut self, sphere: Option<String>) -> Self {
        self.sphere = sphere;
        self
    }

    pub fn goal_id(mut self, goal_id: i32) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    pub fn step_id(mut self, step_id: i32) -> Self {
        self.step_id = Some(step_id);
        self
    }

    pub fn subtask_id(mut self, subtask_id: i32) -> Self {
        self.subtask_id = Some(subtask_id);
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Validates a client submitted event.
    ///
    /// `occurred_at` defaults to `now` and is clamped to `now` when it lies more than
    /// five minutes in the future.
    ///
    /// # Returns
    /// - `Ok(CreateEventParam)` - Validated parameters
    /// - `Err(AppError::BadRequest)` - Unknown event type, sphere or source, or an
    ///   over-long client event id
    pub fn from_dto(user_id: i32, dto: CreateEventDto, now: DateTime<Utc>) -> Result<Self, AppError> {
        validate_choice("event_type", Some(dto.event_type.as_str()), EVENT_TYPES)?;
        validate_choice("sphere", dto.sphere.as_deref(), SPHERES)?;
        validate_choice("source", dto.source.as_deref(), SOURCES)?;

        if let Some(id) = &dto.client_event_id {
            if id.is_empty() || id.chars().count() > MAX_CLIENT_EVENT_ID_LEN {
                return Err(AppError::BadRequest(format!(
                    "client_event_id must be 1 to {} characters",
                    MAX_CLIENT_EVENT_ID_LEN
                )));
            }
        }

        let occurred_at = match dto.occurred_at {
            Some(at) if at > now + Duration::minutes(MAX_FUTURE_SKEW_MINUTES) => now,
            Some(at) => at,
            None => now,
        };

        Ok(Self {
            user_id,
            event_type: dto.event_type,
            occurred_at,
            payload: dto.payload,
            client_event_id: dto.client_event_id,
            source: dto.source,
            sphere: dto.sphere,
            goal_id: dto.goal_id,
            step_id: dto.step_id,
            subtask_id: dto.subtask_id,
        })
    }
}

/// Outcome of recording an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedEvent {
    pub id: i32,
    /// True when an event with the same client id already existed.
    pub duplicate: bool,
}

/// Filters for listing a user's events.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub event_type: Option<String>,
    pub sphere: Option<String>,
    pub goal_id: Option<i32>,
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound.
    pub until: Option<DateTime<Utc>>,
    pub limit: u64,
    pub offset: u64,
}

impl EventFilter {
    pub fn from_dto(dto: EventQueryDto) -> Self {
        Self {
            event_type: dto.event_type,
            sphere: dto.sphere,
            goal_id: dto.goal_id,
            from: dto.start_date.map(start_of_day),
            until: dto
                .end_date
                .and_then(|d| d.succ_opt())
                .map(start_of_day),
            limit: dto
                .limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .clamp(1, MAX_LIST_LIMIT),
            offset: dto.offset.unwrap_or(0),
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
