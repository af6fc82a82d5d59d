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
                    .table(AiMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(AiMessage::Id))
                    .col(integer(AiMessage::UserId))
                    .col(string(AiMessage::Kind))
                    .col(integer(AiMessage::Priority).default(1))
                    .col(text(AiMessage::Message))
                    .col(string(AiMessage::Emoji))
                    .col(json_null(AiMessage::Metadata))
                    .col(boolean(AiMessage::Shown).default(false))
                    .col(boolean(AiMessage::Dismissed).default(false))
                    .col(
                        timestamp_with_time_zone(AiMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(AiMessage::ExpiresAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_message_user_id")
                            .from(AiMessage::Table, AiMessage::UserId)
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
            .drop_table(Table::drop().table(AiMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AiMessage {
    Table,
    Id,
    UserId,
    Kind,
    Priority,
    Message,
    Emoji,
    Metadata,
    Shown,
    Dismissed,
    CreatedAt,
    ExpiresAt,
}
