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
                    .table(TeamGoalStep::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamGoalStep::Id))
                    .col(integer(TeamGoalStep::TeamGoalId))
                    .col(integer(TeamGoalStep::UserId))
                    .col(integer(TeamGoalStep::Value))
                    .col(text_null(TeamGoalStep::Note))
                    .col(
                        timestamp_with_time_zone(TeamGoalStep::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_goal_step_team_goal_id")
                            .from(TeamGoalStep::Table, TeamGoalStep::TeamGoalId)
                            .to(TeamGoal::Table, TeamGoal::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_goal_step_user_id")
                            .from(TeamGoalStep::Table, TeamGoalStep::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamGoalStep::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeamGoalStep {
    Table,
    Id,
    TeamGoalId,
    UserId,
    Value,
    Note,
    CreatedAt,
}
