//! Raffle reservation business logic.
//!
//! `RaffleService` orchestrates the reservation flow: validation and number
//! canonicalization, the best-effort mirror availability check, the local CPF
//! pre-check, the transactional insert, the live-update broadcast and the detached
//! mirror append. The pre-checks exist for fast, friendly failures; under
//! concurrency the unique constraints at insert time are what actually guarantee
//! that a number (and a CPF) is granted at most once.

use std::{collections::HashSet, sync::Arc};

use rand::seq::IndexedRandom;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use serde_json::Value;

use crate::{
    data::participant::ParticipantRepository,
    error::AppError,
    model::participant::{
        AvailabilitySource, CreateParticipantParam, NumberAvailability, Participant, ReserveParam,
    },
    notifier::EventBroadcaster,
    sheets::{MirrorRow, MirrorSnapshot, RemoteMirror},
    util::validate,
};

/// Total count of canonical raffle numbers (0000 through 9999).
const NUMBER_SPACE: i64 = 10000;

/// Service providing business logic for raffle reservations.
pub struct RaffleService<'a> {
    db: &'a DatabaseConnection,
    mirror: Option<Arc<dyn RemoteMirror>>,
    events: EventBroadcaster,
}

impl<'a> RaffleService<'a> {
    /// Creates a new RaffleService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `mirror` - Optional remote mirror client (`None` in local-only mode)
    /// - `events` - Live-update broadcast registry
    ///
    /// # Returns
    /// - `RaffleService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        mirror: Option<Arc<dyn RemoteMirror>>,
        events: EventBroadcaster,
    ) -> Self {
        Self { db, mirror, events }
    }

    /// Reserves a raffle number for a participant.
    ///
    /// Runs every validator and the number formatter first, accumulating all
    /// failures instead of short-circuiting. Then checks availability against the
    /// mirror (best-effort) and the local store, inserts inside a transaction and,
    /// after the commit, broadcasts the new participant and spawns the detached
    /// mirror append. The append never affects the returned result; a failed append
    /// leaves the row for the reconciliation task.
    ///
    /// # Arguments
    /// - `param` - Raw reservation request
    ///
    /// # Returns
    /// - `Ok(Participant)` - The committed reservation
    /// - `Err(AppError::Validation)` - One or more fields invalid (nothing persisted)
    /// - `Err(AppError::Conflict)` - Number or CPF already used, from either store
    /// - `Err(AppError::DbErr)` - Storage failure during insert or commit
    pub async fn reserve(&self, param: ReserveParam) -> Result<Participant, AppError> {
        let mut errors = Vec::new();

        if !validate::full_name(&param.full_name) {
            errors.push("Nome inválido.".to_string());
        }
        if !validate::cpf(&param.cpf) {
            errors.push("CPF inválido.".to_string());
        }
        if !validate::phone(&param.phone) {
            errors.push("Telefone inválido.".to_string());
        }
        if !validate::email(&param.email) {
            errors.push("E-mail inválido.".to_string());
        }
        if !validate::store(&param.store) {
            errors.push("Loja inválida.".to_string());
        }
        if !validate::accepted_rules(param.accepted.as_ref()) {
            errors.push("É necessário aceitar o regulamento.".to_string());
        }

        let raffle_number = match validate::format_raffle_number(&param.number) {
            Some(number) => number,
            None => {
                errors.push("Número da rifa inválido.".to_string());
                return Err(AppError::Validation(errors));
            }
        };

        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let cpf = validate::only_digits(&param.cpf);

        if let Some(snapshot) = self.mirror_snapshot().await {
            if snapshot.numbers.contains(&raffle_number) {
                return Err(AppError::Conflict("Número já reservado.".to_string()));
            }
            if snapshot.cpfs.contains(&cpf) {
                return Err(AppError::Conflict("CPF já cadastrado.".to_string()));
            }
        }

        let repo = ParticipantRepository::new(self.db);

        // Friendly fast-fail; racing requests are caught by the constraint below.
        if repo.find_by_cpf(&cpf).await?.is_some() {
            return Err(AppError::Conflict("CPF já cadastrado.".to_string()));
        }

        let participant = repo
            .create(CreateParticipantParam {
                full_name: param.full_name.trim().to_string(),
                cpf,
                phone: validate::only_digits(&param.phone),
                email: param.email.trim().to_string(),
                store: param.store.trim().to_string(),
                raffle_number,
            })
            .await
            .map_err(classify_insert_error)?;

        self.events.publish(participant.clone().into_dto());
        self.spawn_mirror_append(&participant);

        Ok(participant)
    }

    /// Checks whether a raffle number is available.
    ///
    /// Canonicalizes the number, consults the mirror first (best-effort) and falls
    /// back to the authoritative local store.
    ///
    /// # Arguments
    /// - `number` - Raw number as submitted (JSON integer or string)
    ///
    /// # Returns
    /// - `Ok(NumberAvailability)` - Canonical number, availability and source
    /// - `Err(AppError::BadRequest)` - Malformed number
    /// - `Err(AppError::DbErr)` - Database error during the local check
    pub async fn check_availability(&self, number: &Value) -> Result<NumberAvailability, AppError> {
        let formatted = validate::format_raffle_number(number)
            .ok_or_else(|| AppError::BadRequest("Número inválido. Use 0001 a 9999.".to_string()))?;

        if let Some(snapshot) = self.mirror_snapshot().await {
            if snapshot.numbers.contains(&formatted) {
                return Ok(NumberAvailability {
                    number: formatted,
                    available: false,
                    source: AvailabilitySource::Mirror,
                });
            }
        }

        let repo = ParticipantRepository::new(self.db);
        let taken = repo.exists_by_number(&formatted).await?;

        Ok(NumberAvailability {
            number: formatted,
            available: !taken,
            source: AvailabilitySource::Local,
        })
    }

    /// Suggests a random free raffle number.
    ///
    /// Subtracts the locally used numbers and (best-effort) the mirror's numbers
    /// from the full canonical range and picks uniformly from the remainder.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - A free canonical number
    /// - `Ok(None)` - Every number is taken
    /// - `Err(AppError::DbErr)` - Database error during the used-number query
    pub async fn suggest_random_number(&self) -> Result<Option<String>, AppError> {
        let repo = ParticipantRepository::new(self.db);
        let mut used: HashSet<String> = repo.get_used_numbers().await?.into_iter().collect();

        if let Some(snapshot) = self.mirror_snapshot().await {
            used.extend(snapshot.numbers);
        }

        let available: Vec<String> = (0..NUMBER_SPACE)
            .map(|number| format!("{number:04}"))
            .filter(|number| !used.contains(number))
            .collect();

        Ok(available.choose(&mut rand::rng()).cloned())
    }

    /// Lists all committed reservations, newest first.
    ///
    /// # Returns
    /// - `Ok(Vec<Participant>)` - Every participant, most recent first
    /// - `Err(AppError::DbErr)` - Database error during query
    pub async fn list_participants(&self) -> Result<Vec<Participant>, AppError> {
        let repo = ParticipantRepository::new(self.db);
        Ok(repo.get_all_newest_first().await?)
    }

    /// Reads the mirror's taken-numbers snapshot, treating any failure as
    /// "no information".
    async fn mirror_snapshot(&self) -> Option<MirrorSnapshot> {
        let mirror = self.mirror.as_ref()?;

        match mirror.snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("Mirror lookup failed, proceeding without it: {}", err);
                None
            }
        }
    }

    /// Appends the committed row to the mirror on a detached task.
    ///
    /// Success sets the sync marker; failure leaves the row unsynced for the
    /// reconciliation task. Errors stay inside the task.
    fn spawn_mirror_append(&self, participant: &Participant) {
        let Some(mirror) = self.mirror.clone() else {
            return;
        };

        let db = self.db.clone();
        let row = MirrorRow::from_participant(participant);
        let id = participant.id;

        tokio::spawn(async move {
            if let Err(err) = mirror.append(&[row]).await {
                tracing::warn!(
                    "Mirror append failed for participant {}, leaving for reconciliation: {}",
                    id,
                    err
                );
                return;
            }

            let repo = ParticipantRepository::new(&db);
            if let Err(err) = repo.mark_synced(&[id], chrono::Utc::now()).await {
                tracing::warn!("Failed to mark participant {} as synced: {}", id, err);
            }
        });
    }
}

/// Maps a failed insert to its user-facing error.
///
/// Unique-constraint violations become conflicts, split by which constraint fired;
/// anything else surfaces as an opaque storage error.
fn classify_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            if message.contains("raffle_number") {
                AppError::Conflict("Número já reservado.".to_string())
            } else {
                AppError::Conflict("CPF já cadastrado.".to_string())
            }
        }
        _ => AppError::DbErr(err),
    }
}
