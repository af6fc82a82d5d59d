use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Achievement::Table)
                    .if_not_exists()
                    .col(pk_auto(Achievement::Id))
                    .col(string_uniq(Achievement::Code))
                    .col(string(Achievement::Title))
                    .col(text(Achievement::Description))
                    .col(string_null(Achievement::Icon))
                    .col(string(Achievement::Kind))
                    .col(json_null(Achievement::Requirement))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Achievement::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Achievement {
    Table,
    Id,
    Code,
    Title,
    Description,
    Icon,
    Kind,
    Requirement,
}
