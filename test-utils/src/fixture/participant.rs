//! Participant fixtures for creating in-memory test data.
//!
//! Provides default field values for valid reservation requests and a generator for
//! checksum-valid CPFs, so tests never hard-code identifiers that accidentally fail
//! validation.

use chrono::Utc;

/// Default test participant name.
pub const DEFAULT_FULL_NAME: &str = "Maria da Silva";

/// Default test phone (11 digits, mobile shape).
pub const DEFAULT_PHONE: &str = "11987654321";

/// Default test email.
pub const DEFAULT_EMAIL: &str = "maria@example.com";

/// Default test store tag.
pub const DEFAULT_STORE: &str = "Loja Centro";

/// Default canonical raffle number.
pub const DEFAULT_RAFFLE_NUMBER: &str = "0042";

/// Builds a checksum-valid 11-digit CPF from a 9-digit base.
///
/// Computes both modulo-11 check digits (weights 10..2 for the first over the base,
/// 11..2 for the second over base + first digit; results >= 10 map to 0) and appends
/// them, matching the validation the application performs.
///
/// # Arguments
/// - `base` - Exactly 9 decimal digits
///
/// # Returns
/// - `String` - The full 11-digit CPF
///
/// # Panics
/// - If `base` does not contain exactly 9 digits (invalid test data)
pub fn valid_cpf(base: &str) -> String {
    let digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    assert_eq!(digits.len(), 9, "CPF base must contain exactly 9 digits");

    let first = check_digit(&digits, 10);
    let mut all = digits;
    all.push(first);
    let second = check_digit(&all, 11);
    all.push(second);

    all.into_iter()
        .filter_map(|d| char::from_digit(d, 10))
        .collect()
}

fn check_digit(digits: &[u32], max_weight: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=max_weight).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let check = 11 - (sum % 11);
    if check >= 10 {
        0
    } else {
        check
    }
}

/// Creates a participant entity model with default values.
///
/// This function creates an in-memory participant entity without inserting into the
/// database. Use this for unit tests and mocking repository responses.
///
/// # Returns
/// - `entity::participant::Model` - In-memory participant entity
pub fn entity() -> entity::participant::Model {
    entity::participant::Model {
        id: 1,
        full_name: DEFAULT_FULL_NAME.to_string(),
        cpf: valid_cpf("529982247"),
        phone: DEFAULT_PHONE.to_string(),
        email: DEFAULT_EMAIL.to_string(),
        store: DEFAULT_STORE.to_string(),
        raffle_number: DEFAULT_RAFFLE_NUMBER.to_string(),
        accepted_rules: true,
        created_at: Utc::now(),
        sheets_synced_at: None,
    }
}
