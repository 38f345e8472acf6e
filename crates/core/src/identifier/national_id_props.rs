//! Property-based tests for national identifier validation.

use proptest::prelude::*;

use super::national_id::{is_valid_national_id, national_id_control_digit};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A prefix completed with its computed control digit always validates,
    /// and every other final digit is rejected.
    #[test]
    fn prop_computed_control_digit_accepted(prefix in "[0-9]{12}") {
        let control = national_id_control_digit(&prefix).unwrap();
        let id = format!("{prefix}{control}");
        prop_assert!(is_valid_national_id(&id));

        for other in (0..10u32).filter(|d| *d != control) {
            let id = format!("{prefix}{other}");
            prop_assert!(!is_valid_national_id(&id));
        }
    }

    /// Any string that is not exactly 13 characters is rejected.
    #[test]
    fn prop_wrong_length_rejected(id in "[0-9]{0,12}|[0-9]{14,20}") {
        prop_assert!(!is_valid_national_id(&id));
    }

    /// A single non-digit character anywhere invalidates the identifier.
    #[test]
    fn prop_non_digit_rejected(
        prefix in "[0-9]{12}",
        position in 0usize..13,
        bad in "[a-zA-Z /.-]",
    ) {
        let control = national_id_control_digit(&prefix).unwrap();
        let mut id: Vec<char> = format!("{prefix}{control}").chars().collect();
        id[position] = bad.chars().next().unwrap();
        let id: String = id.into_iter().collect();
        prop_assert!(!is_valid_national_id(&id));
    }
}
