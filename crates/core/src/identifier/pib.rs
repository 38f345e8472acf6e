//! Tax identification number (PIB) checksum.

use super::ascii_digits;

/// Computes the ISO 7064 MOD 11,10 control digit for an 8-digit PIB prefix.
#[must_use]
pub fn pib_control_digit(prefix: &str) -> Option<u32> {
    ascii_digits::<8>(prefix).map(|digits| control_digit(&digits))
}

/// Returns true if `id` is 9 ASCII digits with a valid control digit.
#[must_use]
pub fn is_valid_pib(id: &str) -> bool {
    let Some(digits) = ascii_digits::<9>(id) else {
        return false;
    };
    let (prefix, control) = digits.split_at(8);
    control.first().copied() == Some(control_digit(prefix))
}

fn control_digit(prefix: &[u32]) -> u32 {
    let product = prefix.iter().fold(10, |product, digit| {
        let sum = match (product + digit) % 10 {
            0 => 10,
            s => s,
        };
        (2 * sum) % 11
    });
    (11 - product) % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pibs() {
        assert!(is_valid_pib("101234569"));
        assert!(is_valid_pib("107654324"));
        assert!(is_valid_pib("100000008"));
    }

    #[test]
    fn test_invalid_pibs() {
        assert!(!is_valid_pib("101234560"));
        assert!(!is_valid_pib("10123456"));
        assert!(!is_valid_pib("1012345690"));
        assert!(!is_valid_pib("10123456X"));
        assert!(!is_valid_pib(""));
    }

    #[test]
    fn test_pib_control_digit() {
        assert_eq!(pib_control_digit("12345678"), Some(8));
        assert_eq!(pib_control_digit("1234567"), None);
    }
}
