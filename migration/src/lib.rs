pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_participant_table;
mod m20260110_000002_add_store_to_participant;
mod m20260112_000003_add_sheets_synced_at_to_participant;
mod m20260118_000004_add_cpf_unique_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_participant_table::Migration),
            Box::new(m20260110_000002_add_store_to_participant::Migration),
            Box::new(m20260112_000003_add_sheets_synced_at_to_participant::Migration),
            Box::new(m20260118_000004_add_cpf_unique_index::Migration),
        ]
    }
}
