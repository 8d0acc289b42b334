//! API data transfer objects.
//!
//! Request bodies use the camelCase keys the form submits; response bodies keep the
//! snake_case participant shape clients already consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::participant::AvailabilitySource;

/// Participant as exposed over the API and the event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: i32,
    pub full_name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub store: String,
    pub raffle_number: String,
    pub accepted_rules: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /reserve-number`.
///
/// Every field defaults so that missing keys surface as validation messages
/// instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequestDto {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub number: Value,
    #[serde(default)]
    pub accepted: Option<Value>,
}

/// Body of `POST /check-number`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckNumberRequestDto {
    #[serde(default)]
    pub number: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReserveResponseDto {
    pub ok: bool,
    pub message: String,
    pub participant: ParticipantDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckNumberResponseDto {
    pub ok: bool,
    pub number: String,
    pub available: bool,
    pub source: AvailabilitySource,
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomNumberResponseDto {
    pub ok: bool,
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantsResponseDto {
    pub ok: bool,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponseDto {
    pub ok: bool,
}

/// Error envelope for 4xx/5xx responses; `errors` carries the accumulated
/// validation messages when present.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponseDto {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}
