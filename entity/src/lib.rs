//! SeaORM entity definitions for the goal tracker schema.
//!
//! Each module mirrors one table created by the `migration` crate. The `prelude`
//! re-exports every `Entity` under its table-derived name.

pub mod prelude;

pub mod achievement;
pub mod achievement_on_user;
pub mod ai_message;
pub mod event;
pub mod feed_event;
pub mod friendship;
pub mod goal;
pub mod group;
pub mod group_member;
pub mod step;
pub mod subtask;
pub mod team_goal;
pub mod team_goal_contributor;
pub mod team_goal_step;
pub mod user;
pub mod workspace;
pub mod workspace_invite;
pub mod workspace_member;
