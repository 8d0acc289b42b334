//! Field validation and raffle number canonicalization.
//!
//! All functions here are pure and total over their input: they return booleans or
//! `Option` and never touch storage. The reservation service accumulates the
//! corresponding user-facing messages; nothing in this module produces errors itself.

use serde_json::Value;

/// Inclusive upper bound of the raffle number range.
const MAX_RAFFLE_NUMBER: i64 = 9999;

/// Strips every non-digit character.
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// A full name is valid when its trimmed length is at least 3 characters.
pub fn full_name(input: &str) -> bool {
    input.trim().chars().count() >= 3
}

/// A store tag is valid when its trimmed length is at least 2 characters.
pub fn store(input: &str) -> bool {
    input.trim().chars().count() >= 2
}

/// Validates a CPF by recomputing both check digits.
///
/// Extracts digits; requires exactly 11; rejects sequences of one repeated digit;
/// recomputes the two modulo-11 check digits (weights 10..2 over digits 0..8 for the
/// first, 11..2 over digits 0..9 for the second, results >= 10 mapping to 0) and
/// compares them with positions 9 and 10.
pub fn cpf(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
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

/// An email is valid when it matches the `local@domain.tld` shape with a final label
/// of at least 2 characters and no embedded whitespace.
pub fn email(input: &str) -> bool {
    let email = input.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, label)) = domain.split_once('.') else {
        return false;
    };
    !host.is_empty() && label.chars().count() >= 2
}

/// A phone is valid when it has exactly 10 or 11 digits after stripping (Brazilian
/// landline or 9-digit mobile).
pub fn phone(input: &str) -> bool {
    let digits = only_digits(input);
    digits.len() == 10 || digits.len() == 11
}

/// Whether the raffle rules were accepted.
///
/// Accepts the values the form historically submitted: `true`, `"true"`, `1`,
/// `"1"` and `"on"`.
pub fn accepted_rules(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(accepted)) => *accepted,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(s.as_str(), "true" | "1" | "on"),
        _ => false,
    }
}

/// Canonicalizes a raffle number to its 4-digit zero-padded form.
///
/// Accepts a JSON integer or string; strings are stripped of non-digit characters
/// before parsing. Returns `None` for non-integers and values outside [0, 9999].
/// The canonical form is the only representation ever compared for uniqueness,
/// stored, or displayed.
pub fn format_raffle_number(input: &Value) -> Option<String> {
    match input {
        Value::Number(n) => canonical_number(n.as_i64()?),
        Value::String(s) => canonical_number_from_str(s),
        _ => None,
    }
}

/// Canonicalizes a raffle number read from a free-form string cell.
///
/// Shared with the mirror snapshot, where spreadsheet cells may have lost their
/// zero padding.
pub fn canonical_number_from_str(input: &str) -> Option<String> {
    let digits = only_digits(input.trim());
    if digits.is_empty() {
        return None;
    }
    canonical_number(digits.parse::<i64>().ok()?)
}

fn canonical_number(number: i64) -> Option<String> {
    if (0..=MAX_RAFFLE_NUMBER).contains(&number) {
        Some(format!("{number:04}"))
    } else {
        None
    }
}
