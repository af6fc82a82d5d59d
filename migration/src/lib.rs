pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_user_table;
mod m20260301_000002_create_goal_table;
mod m20260301_000003_create_subtask_table;
mod m20260301_000004_create_step_table;
mod m20260301_000005_create_achievement_table;
mod m20260301_000006_create_achievement_on_user_table;
mod m20260301_000007_create_friendship_table;
mod m20260301_000008_create_feed_event_table;
mod m20260301_000009_create_event_table;
mod m20260301_000010_create_group_table;
mod m20260301_000011_create_group_member_table;
mod m20260301_000012_create_workspace_table;
mod m20260301_000013_create_workspace_member_table;
mod m20260301_000014_create_workspace_invite_table;
mod m20260301_000015_create_team_goal_table;
mod m20260301_000016_create_team_goal_step_table;
mod m20260301_000017_create_team_goal_contributor_table;
mod m20260301_000018_create_ai_message_table;
mod m20260301_000019_seed_achievements;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_user_table::Migration),
            Box::new(m20260301_000002_create_goal_table::Migration),
            Box::new(m20260301_000003_create_subtask_table::Migration),
            Box::new(m20260301_000004_create_step_table::Migration),
            Box::new(m20260301_000005_create_achievement_table::Migration),
            Box::new(m20260301_000006_create_achievement_on_user_table::Migration),
            Box::new(m20260301_000007_create_friendship_table::Migration),
            Box::new(m20260301_000008_create_feed_event_table::Migration),
            Box::new(m20260301_000009_create_event_table::Migration),
            Box::new(m20260301_000010_create_group_table::Migration),
            Box::new(m20260301_000011_create_group_member_table::Migration),
            Box::new(m20260301_000012_create_workspace_table::Migration),
            Box::new(m20260301_000013_create_workspace_member_table::Migration),
            Box::new(m20260301_000014_create_workspace_invite_table::Migration),
            Box::new(m20260301_000015_create_team_goal_table::Migration),
            Box::new(m20260301_000016_create_team_goal_step_table::Migration),
            Box::new(m20260301_000017_create_team_goal_contributor_table::Migration),
            Box::new(m20260301_000018_create_ai_message_table::Migration),
            Box::new(m20260301_000019_seed_achievements::Migration),
        ]
    }
}
