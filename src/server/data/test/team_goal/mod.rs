use crate::server::data::team_goal::{TeamGoalFilter, TeamGoalRepository};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod add_step;
mod get_by_workspace;
mod get_member_stats;
