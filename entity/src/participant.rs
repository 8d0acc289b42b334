use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub store: String,
    #[sea_orm(unique)]
    pub raffle_number: String,
    pub accepted_rules: bool,
    pub created_at: DateTimeUtc,
    pub sheets_synced_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
