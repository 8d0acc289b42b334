use sea_orm_migration::prelude::*;

use crate::m20260105_000001_create_participant_table::Participant;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One reservation per CPF, enforced at the store level like the
        // raffle number. The friendly pre-check in the service stays; this
        // index is the backstop under concurrent requests.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participant_cpf")
                    .table(Participant::Table)
                    .col(Participant::Cpf)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_participant_cpf")
                    .table(Participant::Table)
                    .to_owned(),
            )
            .await
    }
}
