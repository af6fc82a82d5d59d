use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000015_create_team_goal_table::TeamGoal,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamGoalContributor::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamGoalContributor::Id))
                    .col(integer(TeamGoalContributor::TeamGoalId))
                    .col(integer(TeamGoalContributor::UserId))
                    .col(integer(TeamGoalContributor::Contribution).default(0))
                    .col(
                        timestamp_with_time_zone(TeamGoalContributor::JoinedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_goal_contributor_team_goal_id")
                            .from(TeamGoalContributor::Table, TeamGoalContributor::TeamGoalId)
                            .to(TeamGoal::Table, TeamGoal::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_goal_contributor_user_id")
                            .from(TeamGoalContributor::Table, TeamGoalContributor::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_team_goal_contributor_unique")
                    .table(TeamGoalContributor::Table)
                    .col(TeamGoalContributor::TeamGoalId)
                    .col(TeamGoalContributor::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamGoalContributor::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeamGoalContributor {
    Table,
    Id,
    TeamGoalId,
    UserId,
    Contribution,
    JoinedAt,
}
