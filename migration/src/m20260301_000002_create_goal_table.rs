use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Goal::Table)
                    .if_not_exists()
                    .col(pk_auto(Goal::Id))
                    .col(integer(Goal::UserId))
                    .col(string(Goal::Title))
                    .col(text_null(Goal::Description))
                    .col(string_null(Goal::Sphere))
                    .col(string(Goal::Privacy).default("private"))
                    .col(string(Goal::ProgressType).default("quantity"))
                    .col(double_null(Goal::TargetValue))
                    .col(
                        timestamp_with_time_zone(Goal::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Goal::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_goal_user_id")
                            .from(Goal::Table, Goal::UserId)
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
                    .name("idx_goal_user_id")
                    .table(Goal::Table)
                    .col(Goal::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Goal::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Goal {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Sphere,
    Privacy,
    ProgressType,
    TargetValue,
    CreatedAt,
    CompletedAt,
}
