//! National personal identifier (JMBG) checksum.
//!
//! The 13th digit is a control digit over the first twelve: the digits are
//! taken in six pairs `(d1, d7) .. (d6, d12)` weighted 7, 6, 5, 4, 3, 2.
//! `control = 11 - (sum mod 11)`, forced to 0 when the result exceeds 9.

use super::ascii_digits;

const WEIGHTS: [u32; 6] = [7, 6, 5, 4, 3, 2];

/// Computes the control digit for a 12-digit identifier prefix.
///
/// Returns `None` if `prefix` is not exactly 12 ASCII digits.
#[must_use]
pub fn national_id_control_digit(prefix: &str) -> Option<u32> {
    ascii_digits::<12>(prefix).map(|digits| control_digit(&digits))
}

/// Returns true if `id` is a 13-digit national identifier whose last digit
/// matches the modulo-11 control digit.
#[must_use]
pub fn is_valid_national_id(id: &str) -> bool {
    let Some(digits) = ascii_digits::<13>(id) else {
        return false;
    };
    let (prefix, control) = digits.split_at(12);
    control.first().copied() == Some(control_digit(prefix))
}

fn control_digit(prefix: &[u32]) -> u32 {
    let sum: u32 = WEIGHTS
        .iter()
        .zip(prefix.iter().zip(prefix.iter().skip(6)))
        .map(|(weight, (a, b))| weight * (a + b))
        .sum();
    let control = 11 - sum % 11;
    if control > 9 { 0 } else { control }
}
