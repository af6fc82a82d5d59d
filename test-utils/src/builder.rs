use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Goal};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Goal)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables should be added in dependency order (tables with foreign
    /// keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the personal goal tables: User, Goal, Subtask and Step.
    pub fn with_goal_tables(self) -> Self {
        self.with_table(User)
            .with_table(Goal)
            .with_table(Subtask)
            .with_table(Step)
    }

    /// Adds everything the achievement rule engine reads and writes.
    ///
    /// Includes the goal tables plus Achievement, AchievementOnUser and FeedEvent.
    pub fn with_achievement_tables(self) -> Self {
        self.with_goal_tables()
            .with_table(Achievement)
            .with_table(AchievementOnUser)
            .with_table(FeedEvent)
    }

    /// Adds User, Friendship and FeedEvent for social features.
    pub fn with_social_tables(self) -> Self {
        self.with_table(User)
            .with_table(Friendship)
            .with_table(FeedEvent)
    }

    /// Adds User and the workspace tables, including team goals.
    pub fn with_workspace_tables(self) -> Self {
        self.with_table(User)
            .with_table(Workspace)
            .with_table(WorkspaceMember)
            .with_table(WorkspaceInvite)
            .with_table(TeamGoal)
            .with_table(TeamGoalStep)
            .with_table(TeamGoalContributor)
    }

    /// Adds every table in the schema in dependency order.
    pub fn with_all_tables(self) -> Self {
        self.with_achievement_tables()
            .with_table(Friendship)
            .with_table(Event)
            .with_table(Group)
            .with_table(GroupMember)
            .with_table(Workspace)
            .with_table(WorkspaceMember)
            .with_table(WorkspaceInvite)
            .with_table(TeamGoal)
            .with_table(TeamGoalStep)
            .with_table(TeamGoalContributor)
            .with_table(AiMessage)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
