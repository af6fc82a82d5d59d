//! Domain models and operation parameters.
//!
//! Repositories convert SeaORM entity models into these types at the data boundary and
//! services work with them exclusively. Each model knows how to turn itself into the
//! wire DTO returned by the controllers.

pub mod achievement;
pub mod ai;
pub mod event;
pub mod feed;
pub mod friend;
pub mod goal;
pub mod group;
pub mod insight;
pub mod team_goal;
pub mod user;
pub mod workspace;
