use crate::server::data::workspace_invite::WorkspaceInviteRepository;
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_active;
mod get_pending_for_email;
