use test_utils::fixture;

use crate::model::participant::CreateParticipantParam;

mod exists_by_number;
mod find_by_cpf;
mod get_used_numbers;
mod mark_synced;

/// Canonical insert params with a distinct CPF and raffle number per suffix.
fn param(suffix: u32) -> CreateParticipantParam {
    CreateParticipantParam {
        full_name: fixture::participant::DEFAULT_FULL_NAME.to_string(),
        cpf: fixture::participant::valid_cpf(&format!("12345{suffix:04}")),
        phone: fixture::participant::DEFAULT_PHONE.to_string(),
        email: fixture::participant::DEFAULT_EMAIL.to_string(),
        store: fixture::participant::DEFAULT_STORE.to_string(),
        raffle_number: format!("{suffix:04}"),
    }
}
