use crate::server::{data::step::StepRepository, model::goal::CreateStepParam};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_by_user_since;
mod get_by_user;
