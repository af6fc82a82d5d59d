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
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(integer(Event::UserId))
                    .col(string(Event::EventType))
                    .col(timestamp_with_time_zone(Event::OccurredAt))
                    .col(json_null(Event::Payload))
                    .col(string_null(Event::ClientEventId))
                    .col(string_null(Event::Source))
                    .col(string_null(Event::Sphere))
                    .col(integer_null(Event::GoalId))
                    .col(integer_null(Event::StepId))
                    .col(integer_null(Event::SubtaskId))
                    .col(
                        timestamp_with_time_zone(Event::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_user_id")
                            .from(Event::Table, Event::UserId)
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
                    .name("idx_event_user_occurred_at")
                    .table(Event::Table)
                    .col(Event::UserId)
                    .col(Event::OccurredAt)
                    .to_owned(),
            )
            .await?;

        // NULL client ids never collide in SQLite unique indexes.
        manager
            .create_index(
                Index::create()
                    .name("idx_event_user_client_event_id")
                    .table(Event::Table)
                    .col(Event::UserId)
                    .col(Event::ClientEventId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    UserId,
    EventType,
    OccurredAt,
    Payload,
    ClientEventId,
    Source,
    Sphere,
    GoalId,
    StepId,
    SubtaskId,
    CreatedAt,
}
