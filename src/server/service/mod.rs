//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Ownership checks, workspace roles, moderation and validation
//! - **Orchestration**: Fanning a user action out to streaks, achievements, events and feed
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod achievement;
pub mod ai;
pub mod auth;
pub mod avatar;
pub mod event;
pub mod feed;
pub mod friend;
pub mod goal;
pub mod group;
pub mod insight;
pub mod member;
pub mod moderation;
pub mod step;
pub mod streak;
pub mod subtask;
pub mod team_goal;
pub mod user;
pub mod workspace;
