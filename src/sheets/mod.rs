//! Remote mirror integration.
//!
//! The mirror is a Google Sheets spreadsheet staff watch for incoming reservations.
//! It is a secondary, non-authoritative store: the service reads it for a
//! best-effort "already taken" snapshot and appends committed rows to it, but the
//! local database always decides correctness. Everything behind the `RemoteMirror`
//! trait is allowed to fail; callers log and degrade.

pub mod client;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::{error::sheets::SheetsError, model::participant::Participant};

/// Column headers of the mirror sheet. Rewritten in place whenever the first row
/// does not match (self-healing).
pub const SHEET_HEADER: [&str; 7] = ["Date", "Number", "Name", "CPF", "Store", "Phone", "Email"];

/// Numbers and CPFs already recorded in the mirror at read time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MirrorSnapshot {
    /// Canonical raffle numbers present in the sheet.
    pub numbers: HashSet<String>,
    /// CPFs (digits only) present in the sheet.
    pub cpfs: HashSet<String>,
}

/// One spreadsheet row in the fixed 7-column shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorRow {
    pub date: String,
    pub number: String,
    pub name: String,
    pub cpf: String,
    pub store: String,
    pub phone: String,
    pub email: String,
}

impl MirrorRow {
    /// Builds a mirror row from a committed participant.
    ///
    /// The date cell is localized as `dd/mm/yyyy HH:MM:SS`.
    pub fn from_participant(participant: &Participant) -> Self {
        Self {
            date: participant
                .created_at
                .format("%d/%m/%Y %H:%M:%S")
                .to_string(),
            number: participant.raffle_number.clone(),
            name: participant.full_name.clone(),
            cpf: participant.cpf.clone(),
            store: participant.store.clone(),
            phone: participant.phone.clone(),
            email: participant.email.clone(),
        }
    }

    /// The row as sheet cell values, in header order.
    pub fn to_values(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.number.clone(),
            self.name.clone(),
            self.cpf.clone(),
            self.store.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
    }
}

/// Seam between the reservation flow and the spreadsheet.
///
/// Implemented by the Google Sheets client in production and by stubs in tests.
#[async_trait]
pub trait RemoteMirror: Send + Sync {
    /// Reads the numbers and CPFs already recorded in the mirror.
    async fn snapshot(&self) -> Result<MirrorSnapshot, SheetsError>;

    /// Appends rows to the mirror sheet, healing the header first if needed.
    async fn append(&self, rows: &[MirrorRow]) -> Result<(), SheetsError>;
}
