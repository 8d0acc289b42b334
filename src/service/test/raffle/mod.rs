use serde_json::json;
use test_utils::fixture;

use crate::model::participant::ReserveParam;

mod reserve;
mod suggest_random_number;

/// A fully valid reservation request with a distinct CPF and number per suffix.
fn reserve_param(suffix: u32) -> ReserveParam {
    ReserveParam {
        full_name: fixture::participant::DEFAULT_FULL_NAME.to_string(),
        cpf: fixture::participant::valid_cpf(&format!("12345{suffix:04}")),
        phone: fixture::participant::DEFAULT_PHONE.to_string(),
        email: fixture::participant::DEFAULT_EMAIL.to_string(),
        store: fixture::participant::DEFAULT_STORE.to_string(),
        number: json!(format!("{suffix:04}")),
        accepted: Some(json!(true)),
    }
}
