//! Participant domain models and operation parameters.
//!
//! Provides the domain model for committed raffle reservations plus the parameter
//! types used by the reservation flow. Entity conversion happens at the repository
//! boundary, DTO conversion at the controller boundary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::model::api::ParticipantDto;

/// A committed raffle reservation.
///
/// Immutable after insert except for `sheets_synced_at`, which is set once the row
/// has been mirrored to the spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    /// Locally-assigned sequential id.
    pub id: i32,
    /// Trimmed full name.
    pub full_name: String,
    /// CPF, digits only.
    pub cpf: String,
    /// Phone, digits only.
    pub phone: String,
    /// Trimmed email address.
    pub email: String,
    /// Store/location tag.
    pub store: String,
    /// Canonical 4-digit zero-padded raffle number.
    pub raffle_number: String,
    /// Whether the raffle rules were accepted (always true for committed rows).
    pub accepted_rules: bool,
    /// Assigned at insert time.
    pub created_at: DateTime<Utc>,
    /// Set to the mirror time once the row reached the spreadsheet.
    pub sheets_synced_at: Option<DateTime<Utc>>,
}

impl Participant {
    /// Converts an entity model to a participant domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Participant` - The converted domain model
    pub fn from_entity(entity: entity::participant::Model) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            cpf: entity.cpf,
            phone: entity.phone,
            email: entity.email,
            store: entity.store,
            raffle_number: entity.raffle_number,
            accepted_rules: entity.accepted_rules,
            created_at: entity.created_at,
            sheets_synced_at: entity.sheets_synced_at,
        }
    }

    /// Converts the participant domain model to a DTO for API responses.
    ///
    /// The sync marker is internal bookkeeping and is not exposed.
    ///
    /// # Returns
    /// - `ParticipantDto` - The converted participant DTO
    pub fn into_dto(self) -> ParticipantDto {
        ParticipantDto {
            id: self.id,
            full_name: self.full_name,
            cpf: self.cpf,
            phone: self.phone,
            email: self.email,
            store: self.store,
            raffle_number: self.raffle_number,
            accepted_rules: self.accepted_rules,
            created_at: self.created_at,
        }
    }
}

/// Parameters for inserting a participant row.
///
/// All fields are already canonical: trimmed strings, digits-only CPF and phone,
/// zero-padded raffle number. The reservation service is the only producer.
#[derive(Debug, Clone)]
pub struct CreateParticipantParam {
    pub full_name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub store: String,
    pub raffle_number: String,
}

/// Raw, unvalidated reservation request as submitted by a client.
///
/// `number` keeps its JSON form because clients send either an integer or a string;
/// `accepted` keeps the original form-encoded leniency (true/"true"/1/"1"/"on").
#[derive(Debug, Clone)]
pub struct ReserveParam {
    pub full_name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub store: String,
    pub number: Value,
    pub accepted: Option<Value>,
}

/// Which store answered an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilitySource {
    /// The remote spreadsheet reported the number as taken.
    Mirror,
    /// The authoritative local database answered.
    Local,
}

/// Result of an availability check for a canonical number.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberAvailability {
    pub number: String,
    pub available: bool,
    pub source: AvailabilitySource,
}
