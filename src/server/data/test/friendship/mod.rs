use crate::server::{data::friendship::FriendshipRepository, model::friend::STATUS_ACCEPTED};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod accept;
mod create_request;
mod find_between;
mod get_friend_ids;
