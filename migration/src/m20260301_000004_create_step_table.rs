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
                    .table(Step::Table)
                    .if_not_exists()
                    .col(pk_auto(Step::Id))
                    .col(integer(Step::GoalId))
                    .col(double_null(Step::Value))
                    .col(text_null(Step::Note))
                    .col(
                        timestamp_with_time_zone(Step::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_step_goal_id")
                            .from(Step::Table, Step::GoalId)
                            .to(Goal::Table, Goal::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_step_goal_id")
                    .table(Step::Table)
                    .col(Step::GoalId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Step::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Step {
    Table,
    Id,
    GoalId,
    Value,
    Note,
    CreatedAt,
}
