//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod achievement;
pub mod ai_message;
pub mod event;
pub mod feed_event;
pub mod friendship;
pub mod goal;
pub mod group;
pub mod step;
pub mod subtask;
pub mod team_goal;
pub mod user;
pub mod workspace;
pub mod workspace_invite;
pub mod workspace_member;

#[cfg(test)]
mod test;
