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
                    .table(WorkspaceInvite::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkspaceInvite::Id))
                    .col(integer(WorkspaceInvite::WorkspaceId))
                    .col(string(WorkspaceInvite::Email))
                    .col(string(WorkspaceInvite::Role))
                    .col(string_uniq(WorkspaceInvite::Token))
                    .col(integer(WorkspaceInvite::InvitedBy))
                    .col(timestamp_with_time_zone(WorkspaceInvite::ExpiresAt))
                    .col(timestamp_with_time_zone_null(WorkspaceInvite::AcceptedAt))
                    .col(
                        timestamp_with_time_zone(WorkspaceInvite::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workspace_invite_workspace_id")
                            .from(WorkspaceInvite::Table, WorkspaceInvite::WorkspaceId)
                            .to(Workspace::Table, Workspace::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workspace_invite_invited_by")
                            .from(WorkspaceInvite::Table, WorkspaceInvite::InvitedBy)
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
            .drop_table(Table::drop().table(WorkspaceInvite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WorkspaceInvite {
    Table,
    Id,
    WorkspaceId,
    Email,
    Role,
    Token,
    InvitedBy,
    ExpiresAt,
    AcceptedAt,
    CreatedAt,
}
