use crate::server::{data::user::UserRepository, model::user::StreakUpdate};
use chrono::{Duration, NaiveDate, Utc};
use entity::prelude::User;
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod find_by_ids;
mod reset_stale_streaks;
mod search;
mod update_streak;
