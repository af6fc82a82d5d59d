use crate::server::data::ai_message::AiMessageRepository;
use chrono::{Duration, Utc};
use entity::prelude::{AiMessage, User};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, ai_message::AiMessageFactory},
};

mod dismiss;
mod get_active;
mod purge;
