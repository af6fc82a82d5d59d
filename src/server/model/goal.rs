//! Goal, subtask and step domain models.
//!
//! Also defines the closed vocabularies for spheres, privacy levels and progress types
//! together with their validation.

use chrono::{DateTime, Utc};

use crate::{
    model::goal::{
        CreateGoalDto, CreateStepDto, GoalDto, StepDto, SubtaskDto, UpdateGoalDto,
    },
    server::error::AppError,
};

/// Life areas a goal or event can be attributed to.
pub const SPHERES: &[&str] = &[
    "work",
    "education",
    "health",
    "finance",
    "relationships",
    "hobby",
    "personal_growth",
];

pub const PRIVACY_LEVELS: &[&str] = &["public", "private", "friends"];
pub const DEFAULT_PRIVACY: &str = "private";

pub const PROGRESS_TYPES: &[&str] = &["quantity", "days", "subtasks", "duration"];
pub const DEFAULT_PROGRESS_TYPE: &str = "quantity";

/// Checks that an optional value belongs to `allowed`.
///
/// # Returns
/// - `Ok(())` - Value is absent or allowed
/// - `Err(AppError::BadRequest)` - Value is not in the vocabulary
pub fn validate_choice(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<(), AppError> {
    match value {
        Some(v) if !allowed.contains(&v) => Err(AppError::BadRequest(format!(
            "{} must be one of: {}",
            field,
            allowed.join(", ")
        ))),
        _ => Ok(()),
    }
}

/// A personal goal owned by a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub sphere: Option<String>,
    pub privacy: String,
    pub progress_type: String,
    pub target_value: Option<f64>,
    pub created_at: DateTime<Utc>,
    /// Set when the goal was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn from_entity(entity: entity::goal::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            description: entity.description,
            sphere: entity.sphere,
            privacy: entity.privacy,
            progress_type: entity.progress_type,
            target_value: entity.target_value,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
        }
    }

    pub fn into_dto(self) -> GoalDto {
        GoalDto {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            sphere: self.sphere,
            privacy: self.privacy,
            progress_type: self.progress_type,
            target_value: self.target_value,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Parameters for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalParam {
    pub user_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub sphere: Option<String>,
    pub privacy: String,
    pub progress_type: String,
    pub target_value: Option<f64>,
}

impl CreateGoalParam {
    /// Validates the vocabularies and applies defaults.
    pub fn from_dto(user_id: i32, dto: CreateGoalDto) -> Result<Self, AppError> {
        validate_choice("sphere", dto.sphere.as_deref(), SPHERES)?;
        validate_choice("privacy", dto.privacy.as_deref(), PRIVACY_LEVELS)?;
        validate_choice("progress_type", dto.progress_type.as_deref(), PROGRESS_TYPES)?;
        if dto.title.trim().is_empty() {
            return Err(AppError::BadRequest("title must not be empty".to_string()));
        }

        Ok(Self {
            user_id,
            title: dto.title,
            description: dto.description,
            sphere: dto.sphere,
            privacy: dto.privacy.unwrap_or_else(|| DEFAULT_PRIVACY.to_string()),
            progress_type: dto
                .progress_type
                .unwrap_or_else(|| DEFAULT_PROGRESS_TYPE.to_string()),
            target_value: dto.target_value,
        })
    }
}

/// Partial goal update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalParam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sphere: Option<String>,
    pub privacy: Option<String>,
    pub progress_type: Option<String>,
    pub target_value: Option<f64>,
    /// `Some(None)` reopens the goal.
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateGoalParam {
    pub fn from_dto(dto: UpdateGoalDto) -> Result<Self, AppError> {
        validate_choice("sphere", dto.sphere.as_deref(), SPHERES)?;
        validate_choice("privacy", dto.privacy.as_deref(), PRIVACY_LEVELS)?;
        validate_choice("progress_type", dto.progress_type.as_deref(), PROGRESS_TYPES)?;

        Ok(Self {
            title: dto.title,
            description: dto.description,
            sphere: dto.sphere,
            privacy: dto.privacy,
            progress_type: dto.progress_type,
            target_value: dto.target_value,
            completed_at: dto.completed_at,
        })
    }
}

/// Result of a goal update.
#[derive(Debug, Clone)]
pub struct UpdatedGoal {
    pub goal: Goal,
    /// True when this update moved `completed_at` from unset to set.
    pub newly_completed: bool,
}

/// Checklist item belonging to a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Subtask {
    pub id: i32,
    pub goal_id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Subtask {
    pub fn from_entity(entity: entity::subtask::Model) -> Self {
        Self {
            id: entity.id,
            goal_id: entity.goal_id,
            title: entity.title,
            completed: entity.completed,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> SubtaskDto {
        SubtaskDto {
            id: self.id,
            goal_id: self.goal_id,
            title: self.title,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}

/// A unit of progress logged against a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: i32,
    pub goal_id: i32,
    pub value: Option<f64>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Step {
    pub fn from_entity(entity: entity::step::Model) -> Self {
        Self {
            id: entity.id,
            goal_id: entity.goal_id,
            value: entity.value,
            note: entity.note,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> StepDto {
        StepDto {
            id: self.id,
            goal_id: self.goal_id,
            value: self.value,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateStepParam {
    pub goal_id: i32,
    pub value: Option<f64>,
    pub note: Option<String>,
}

impl CreateStepParam {
    pub fn from_dto(goal_id: i32, dto: CreateStepDto) -> Self {
        Self {
            goal_id,
            value: dto.value,
            note: dto.note,
        }
    }
}
