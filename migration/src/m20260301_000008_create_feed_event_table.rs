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
                    .table(FeedEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(FeedEvent::Id))
                    .col(integer(FeedEvent::UserId))
                    .col(string(FeedEvent::Kind))
                    .col(json(FeedEvent::Data))
                    .col(
                        timestamp_with_time_zone(FeedEvent::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feed_event_user_id")
                            .from(FeedEvent::Table, FeedEvent::UserId)
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
            .drop_table(Table::drop().table(FeedEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum FeedEvent {
    Table,
    Id,
    UserId,
    Kind,
    Data,
    CreatedAt,
}
