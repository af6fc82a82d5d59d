use crate::server::{data::goal::GoalRepository, model::goal::UpdateGoalParam};
use chrono::{Duration, Utc};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod count_completed_since;
mod delete;
mod update;
