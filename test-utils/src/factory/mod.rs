//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults so tests only spell out the fields
//! they care about. Each entity has a `Factory` builder for customization and/or a
//! `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let goal = factory::goal::GoalFactory::new(&db, user.id)
//!         .sphere("health")
//!         .build()
//!         .await?;
//!     factory::create_step(&db, goal.id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users with streak state
//! - `goal`, `step`, `subtask` - Personal goals and their progress
//! - `achievement` - Catalogue rows and grants
//! - `event` - Analytics events
//! - `friendship` - Friend requests and friendships
//! - `workspace` - Workspaces, memberships and invitations
//! - `team_goal` - Workspace team goals
//! - `ai_message` - Stored insight messages
//! - `helpers` - ID counter and multi-entity shortcuts

pub mod achievement;
pub mod ai_message;
pub mod event;
pub mod friendship;
pub mod goal;
pub mod helpers;
pub mod step;
pub mod subtask;
pub mod team_goal;
pub mod user;
pub mod workspace;

// Re-export commonly used factory functions for concise usage
pub use achievement::{create_achievement, grant_achievement};
pub use friendship::{create_accepted_friendship, create_friendship};
pub use goal::{create_completed_goal, create_goal};
pub use step::{create_step, create_step_at};
pub use subtask::create_subtask;
pub use team_goal::create_team_goal;
pub use user::create_user;
pub use workspace::{create_member, create_workspace};
