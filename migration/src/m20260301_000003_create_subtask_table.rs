use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000002_create_goal_table::Goal;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subtask::Table)
                    .if_not_exists()
                    .col(pk_auto(Subtask::Id))
                    .col(integer(Subtask::GoalId))
                    .col(string(Subtask::Title))
                    .col(boolean(Subtask::Completed).default(false))
                    .col(
                        timestamp_with_time_zone(Subtask::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subtask_goal_id")
                            .from(Subtask::Table, Subtask::GoalId)
                            .to(Goal::Table, Goal::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subtask::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Subtask {
    Table,
    Id,
    GoalId,
    Title,
    Completed,
    CreatedAt,
}
