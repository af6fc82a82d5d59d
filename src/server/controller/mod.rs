//! HTTP request handlers.
//!
//! Each handler authenticates the caller through `AuthGuard`, hands the request to a
//! service and converts the returned domain model into a DTO. Every handler carries a
//! `utoipa::path` annotation and is grouped in the API document by its module's tag.

pub mod achievement;
pub mod ai;
pub mod auth;
pub mod event;
pub mod feed;
pub mod friend;
pub mod goal;
pub mod group;
pub mod insight;
pub mod member;
pub mod param;
pub mod profile;
pub mod team_goal;
pub mod user;
pub mod workspace;
