use lazy_static::lazy_static;
use regex::Regex;

use super::dto::PersonalInfo;

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Percentage (0..=100, rounded) of the six profile facts that are filled in:
/// RUT, phone, birth date, at least one allergy, at least one diagnosed
/// condition, at least one payment method.
pub fn profile_completeness(info: Option<&PersonalInfo>) -> i32 {
    let Some(info) = info else {
        return 0;
    };
    let flags = [
        present(&info.rut),
        present(&info.phone_number),
        present(&info.date_of_birth),
        !info.allergies.is_empty(),
        !info.diagnosed_diseases.is_empty(),
        !info.payment_methods.is_empty(),
    ];
    let filled = flags.iter().filter(|f| **f).count();
    ((filled as f64 / flags.len() as f64) * 100.0).round() as i32
}

/// Modulo-11 check of a Chilean RUT. Dots, dashes and spaces are ignored; the
/// last character is the check digit (`0-9` or `K`).
pub fn validate_rut(rut: &str) -> bool {
    lazy_static! {
        static ref NOT_RUT_CHAR: Regex = Regex::new(r"[^0-9kK]").unwrap();
    }
    let cleaned = NOT_RUT_CHAR.replace_all(rut, "").to_ascii_uppercase();
    if cleaned.len() < 2 {
        return false;
    }

    let (body, dv) = cleaned.split_at(cleaned.len() - 1);
    if !body.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let mut sum = 0u32;
    let mut multiplier = 2u32;
    for b in body.bytes().rev() {
        sum += u32::from(b - b'0') * multiplier;
        multiplier = if multiplier == 7 { 2 } else { multiplier + 1 };
    }

    let expected = match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        d => char::from_digit(d, 10).unwrap_or('?'),
    };
    dv.starts_with(expected)
}
