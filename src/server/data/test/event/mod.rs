use crate::server::{
    data::event::EventRepository,
    model::event::{EventFilter, DEFAULT_LIST_LIMIT},
};
use chrono::{Duration, Utc};
use entity::prelude::{Event, User};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_by_client_event_id;
mod list;
