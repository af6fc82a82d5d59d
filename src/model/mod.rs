//! Wire DTOs shared by the HTTP layer.
//!
//! Every type here is serialized with serde and documented with utoipa so it appears in
//! the OpenAPI document served at `/api/openapi.json`.

pub mod achievement;
pub mod ai;
pub mod api;
pub mod auth;
pub mod event;
pub mod feed;
pub mod friend;
pub mod goal;
pub mod group;
pub mod insight;
pub mod team_goal;
pub mod user;
pub mod workspace;
