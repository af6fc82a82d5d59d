use sea_orm_migration::{prelude::*, schema::*, sea_orm::ConnectionTrait};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Friendship::Table)
                    .if_not_exists()
                    .col(pk_auto(Friendship::Id))
                    .col(integer(Friendship::RequesterId))
                    .col(integer(Friendship::AddresseeId))
                    .col(string(Friendship::Status).default("pending"))
                    .col(
                        timestamp_with_time_zone(Friendship::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_requester_id")
                            .from(Friendship::Table, Friendship::RequesterId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_friendship_addressee_id")
                            .from(Friendship::Table, Friendship::AddresseeId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per unordered pair, whichever user sent the request.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_friendship_pair ON friendship \
                 (min(requester_id, addressee_id), max(requester_id, addressee_id))",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Friendship::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Friendship {
    Table,
    Id,
    RequesterId,
    AddresseeId,
    Status,
    CreatedAt,
}
