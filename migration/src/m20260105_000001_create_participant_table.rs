use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participant::Table)
                    .if_not_exists()
                    .col(pk_auto(Participant::Id))
                    .col(string(Participant::FullName))
                    .col(string(Participant::Cpf))
                    .col(string(Participant::Phone))
                    .col(string(Participant::Email))
                    .col(string_uniq(Participant::RaffleNumber))
                    .col(boolean(Participant::AcceptedRules))
                    .col(timestamp_with_time_zone(Participant::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Participant {
    Table,
    Id,
    FullName,
    Cpf,
    Phone,
    Email,
    Store,
    RaffleNumber,
    AcceptedRules,
    CreatedAt,
    SheetsSyncedAt,
}
