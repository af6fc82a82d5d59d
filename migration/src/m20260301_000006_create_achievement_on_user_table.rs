use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User,
    m20260301_000005_create_achievement_table::Achievement,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AchievementOnUser::Table)
                    .if_not_exists()
                    .col(pk_auto(AchievementOnUser::Id))
                    .col(integer(AchievementOnUser::UserId))
                    .col(integer(AchievementOnUser::AchievementId))
                    .col(
                        timestamp_with_time_zone(AchievementOnUser::AchievedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_achievement_on_user_user_id")
                            .from(AchievementOnUser::Table, AchievementOnUser::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_achievement_on_user_achievement_id")
                            .from(AchievementOnUser::Table, AchievementOnUser::AchievementId)
                            .to(Achievement::Table, Achievement::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_achievement_on_user_unique")
                    .table(AchievementOnUser::Table)
                    .col(AchievementOnUser::UserId)
                    .col(AchievementOnUser::AchievementId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AchievementOnUser::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AchievementOnUser {
    Table,
    Id,
    UserId,
    AchievementId,
    AchievedAt,
}
