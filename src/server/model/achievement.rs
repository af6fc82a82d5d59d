//! Achievement catalogue entries and user grants.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::achievement::{
    AchievementCatalogDto, AchievementDto, AchievementStatsDto, UserAchievementDto,
};

/// A badge from the catalogue with the rule that unlocks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub id: i32,
    /// Stable unique identifier, e.g. `first_goal`.
    pub code: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    /// Rule type evaluated by the achievement engine.
    pub kind: String,
    /// Rule parameters, shape depends on `kind`.
    pub requirement: Option<Value>,
}

impl Achievement {
    pub fn from_entity(entity: entity::achievement::Model) -> Self {
        Self {
            id: entity.id,
            code: entity.code,
            title: entity.title,
            description: entity.description,
            icon: entity.icon,
            kind: entity.kind,
            requirement: entity.requirement,
        }
    }

    pub fn into_dto(self) -> AchievementDto {
        AchievementDto {
            id: self.id,
            code: self.code,
            title: self.title,
            description: self.description,
            icon: self.icon,
            kind: self.kind,
            requirement: self.requirement,
        }
    }
}

/// An achievement held by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAchievement {
    pub achievement: Achievement,
    pub achieved_at: DateTime<Utc>,
}

impl UserAchievement {
    pub fn into_dto(self) -> UserAchievementDto {
        UserAchievementDto {
            achievement: self.achievement.into_dto(),
            achieved_at: self.achieved_at,
        }
    }
}

/// The catalogue split into what a user holds and what is still locked.
#[derive(Debug, Clone)]
pub struct AchievementCatalog {
    pub unlocked: Vec<UserAchievement>,
    pub locked: Vec<Achievement>,
}

impl AchievementCatalog {
    pub fn into_dto(self) -> AchievementCatalogDto {
        AchievementCatalogDto {
            unlocked: self.unlocked.into_iter().map(UserAchievement::into_dto).collect(),
            locked: self.locked.into_iter().map(Achievement::into_dto).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStats {
    pub total: u64,
    pub unlocked: u64,
}

impl AchievementStats {
    /// Unlocked share of the catalogue in percent, 0 for an empty catalogue.
    pub fn progress(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.unlocked as f64 / self.total as f64 * 100.0).round() as u32
    }

    pub fn into_dto(self) -> AchievementStatsDto {
        AchievementStatsDto {
            total: self.total,
            unlocked: self.unlocked,
            locked: self.total.saturating_sub(self.unlocked),
            progress: self.progress(),
        }
    }
}
