use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000001_create_participant_table::Participant;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Additive and idempotent: skip when the column already exists.
        if manager.has_column("participant", "store").await? {
            return Ok(());
        }

        manager
            .alter_table(
                Table::alter()
                    .table(Participant::Table)
                    .add_column(string(Participant::Store).default(""))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Participant::Table)
                    .drop_column(Participant::Store)
                    .to_owned(),
            )
            .await
    }
}
