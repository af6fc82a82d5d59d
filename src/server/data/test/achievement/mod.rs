use crate::server::data::achievement::AchievementRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

mod get_user_achievements;
mod grant;
