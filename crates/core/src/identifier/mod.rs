//! Checksum validation for government-issued identifiers.
//!
//! - `national_id` - 13-digit personal identifier (JMBG), modulo 11
//! - `pib` - 9-digit tax identifier, ISO 7064 MOD 11,10

pub mod national_id;
pub mod pib;

#[cfg(test)]
mod national_id_props;

pub use national_id::{is_valid_national_id, national_id_control_digit};
pub use pib::{is_valid_pib, pib_control_digit};

/// Parses an ASCII digit string of exactly `N` characters.
fn ascii_digits<const N: usize>(id: &str) -> Option<[u32; N]> {
    let bytes = id.as_bytes();
    if bytes.len() != N {
        return None;
    }
    let mut digits = [0u32; N];
    for (slot, byte) in digits.iter_mut().zip(bytes) {
        if !byte.is_ascii_digit() {
            return None;
        }
        *slot = u32::from(byte - b'0');
    }
    Some(digits)
}
