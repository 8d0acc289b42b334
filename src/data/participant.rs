//! Participant data repository for database operations.
//!
//! This module provides the `ParticipantRepository` for managing reservation rows.
//! It handles the transactional insert plus the lookups the reservation flow and the
//! reconciliation task need, converting entities to domain models at the boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::model::participant::{CreateParticipantParam, Participant};

/// Repository providing database operations for raffle reservations.
pub struct ParticipantRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ParticipantRepository<'a> {
    /// Creates a new ParticipantRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ParticipantRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a participant row inside an explicit transaction.
    ///
    /// The creation timestamp is assigned here; `sheets_synced_at` starts NULL and
    /// `accepted_rules` is always true for committed rows (acceptance is validated
    /// upstream). A unique-constraint violation on `raffle_number` or `cpf` aborts
    /// the transaction; callers classify it via `DbErr::sql_err()`.
    ///
    /// # Arguments
    /// - `param` - Canonical participant fields
    ///
    /// # Returns
    /// - `Ok(Participant)` - The committed row, including its assigned id
    /// - `Err(DbErr)` - Constraint violation or other database error
    pub async fn create(&self, param: CreateParticipantParam) -> Result<Participant, DbErr> {
        let txn = self.db.begin().await?;

        let entity = entity::prelude::Participant::insert(entity::participant::ActiveModel {
            full_name: ActiveValue::Set(param.full_name),
            cpf: ActiveValue::Set(param.cpf),
            phone: ActiveValue::Set(param.phone),
            email: ActiveValue::Set(param.email),
            store: ActiveValue::Set(param.store),
            raffle_number: ActiveValue::Set(param.raffle_number),
            accepted_rules: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        })
        .exec_with_returning(&txn)
        .await?;

        txn.commit().await?;

        Ok(Participant::from_entity(entity))
    }

    /// Finds a participant by CPF (digits only).
    ///
    /// # Arguments
    /// - `cpf` - CPF digits to look up
    ///
    /// # Returns
    /// - `Ok(Some(Participant))` - A reservation exists for this CPF
    /// - `Ok(None)` - No reservation with that CPF
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Participant>, DbErr> {
        let entity = entity::prelude::Participant::find()
            .filter(entity::participant::Column::Cpf.eq(cpf))
            .one(self.db)
            .await?;

        Ok(entity.map(Participant::from_entity))
    }

    /// Checks whether a canonical raffle number is already reserved.
    ///
    /// # Arguments
    /// - `number` - Canonical 4-digit number
    ///
    /// # Returns
    /// - `Ok(true)` - The number is taken
    /// - `Ok(false)` - The number is free
    /// - `Err(DbErr)` - Database error during count query
    pub async fn exists_by_number(&self, number: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Participant::find()
            .filter(entity::participant::Column::RaffleNumber.eq(number))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Returns every reserved raffle number.
    ///
    /// Used by the random-number suggestion to subtract the locally used set from
    /// the full canonical range.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - All reserved canonical numbers (empty if none)
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_used_numbers(&self) -> Result<Vec<String>, DbErr> {
        let entities = entity::prelude::Participant::find().all(self.db).await?;

        Ok(entities
            .into_iter()
            .map(|entity| entity.raffle_number)
            .collect())
    }

    /// Returns all participants, newest first.
    ///
    /// Ordered by creation time descending with id as a tie-breaker, so rows
    /// committed within the same second still list in reservation order.
    ///
    /// # Returns
    /// - `Ok(Vec<Participant>)` - All committed reservations (empty if none)
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all_newest_first(&self) -> Result<Vec<Participant>, DbErr> {
        let entities = entity::prelude::Participant::find()
            .order_by_desc(entity::participant::Column::CreatedAt)
            .order_by_desc(entity::participant::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Participant::from_entity).collect())
    }

    /// Returns a bounded batch of rows not yet mirrored to the spreadsheet.
    ///
    /// Oldest rows first, so a permanently-failing append cannot starve earlier
    /// reservations of their retry.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of rows to return
    ///
    /// # Returns
    /// - `Ok(Vec<Participant>)` - Up to `limit` unsynced rows (empty if none)
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_unsynced_batch(&self, limit: u64) -> Result<Vec<Participant>, DbErr> {
        let entities = entity::prelude::Participant::find()
            .filter(entity::participant::Column::SheetsSyncedAt.is_null())
            .order_by_asc(entity::participant::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Participant::from_entity).collect())
    }

    /// Marks rows as mirrored by setting their sync marker.
    ///
    /// Runs outside the original insert transaction; the update is idempotent, so a
    /// lost update only causes a harmless re-append on the next reconciliation tick.
    ///
    /// # Arguments
    /// - `ids` - Ids of the rows that reached the spreadsheet
    /// - `synced_at` - The mirror time to record
    ///
    /// # Returns
    /// - `Ok(())` - Markers updated (returns early if `ids` is empty)
    /// - `Err(DbErr)` - Database error during update
    pub async fn mark_synced(&self, ids: &[i32], synced_at: DateTime<Utc>) -> Result<(), DbErr> {
        if ids.is_empty() {
            return Ok(());
        }

        entity::prelude::Participant::update_many()
            .filter(entity::participant::Column::Id.is_in(ids.iter().copied()))
            .col_expr(
                entity::participant::Column::SheetsSyncedAt,
                Expr::value(synced_at),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }
}
