use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000012_create_workspace_table::Workspace,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamGoal::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamGoal::Id))
                    .col(integer(TeamGoal::WorkspaceId))
                    .col(integer(TeamGoal::OwnerId))
                    .col(string(TeamGoal::Title))
                    .col(text_null(TeamGoal::Description))
                    .col(integer(TeamGoal::TargetValue))
                    .col(string_null(TeamGoal::Category))
                    .col(string(TeamGoal::Visibility).default("workspace"))
                    .col(string(TeamGoal::Status).default("active"))
                    .col(
                        timestamp_with_time_zone(TeamGoal::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(TeamGoal::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_goal_workspace_id")
                            .from(TeamGoal::Table, TeamGoal::WorkspaceId)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_goal_owner_id")
                            .from(TeamGoal::Table, TeamGoal::OwnerId)
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
            .drop_table(Table::drop().table(TeamGoal::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeamGoal {
    Table,
    Id,
    WorkspaceId,
    OwnerId,
    Title,
    Description,
    TargetValue,
    Category,
    Visibility,
    Status,
    CreatedAt,
    CompletedAt,
}
