//! Tax category code selection.
//!
//! The code table changed at a schema version cutover. Which table applies is
//! decided by the document's own issue date, so regenerating a historical
//! document always yields the same codes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::document::TaxRate;

/// Version of the national e-invoice profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Profile in force before the cutover date.
    Legacy,
    /// Profile in force from the cutover date onward.
    Current,
}

impl SchemaVersion {
    /// Selects the version for a document issued on `issue_date`.
    #[must_use]
    pub fn for_issue_date(issue_date: NaiveDate, cutover: NaiveDate) -> Self {
        if issue_date < cutover {
            Self::Legacy
        } else {
            Self::Current
        }
    }

    /// UBL `CustomizationID` (BT-24) for this version.
    #[must_use]
    pub fn customization_id(&self) -> &'static str {
        match self {
            Self::Legacy => "urn:cen.eu:en16931:2017#compliant#urn:mfin.gov.rs:srbdt:2021",
            Self::Current => "urn:cen.eu:en16931:2017#compliant#urn:mfin.gov.rs:srbdt:2022",
        }
    }
}

/// UNCL 5305 tax category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaxCategory {
    /// `S` - standard or reduced rate.
    Standard,
    /// `AE` - reverse charge.
    ReverseCharge,
    /// `Z` - zero rated.
    ZeroRated,
    /// `E` - exempt.
    Exempt,
    /// `O` - outside the scope of VAT.
    OutOfScope,
}

impl TaxCategory {
    /// Returns the category code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Standard => "S",
            Self::ReverseCharge => "AE",
            Self::ZeroRated => "Z",
            Self::Exempt => "E",
            Self::OutOfScope => "O",
        }
    }

    /// Returns true if documents using this category should carry an
    /// exemption reason code.
    #[must_use]
    pub fn needs_exemption_reason(&self) -> bool {
        !matches!(self, Self::Standard)
    }
}

/// Looks up the tax category for a line.
///
/// Total over rate × reverse charge × schema version.
#[must_use]
pub fn tax_category(rate: TaxRate, reverse_charge: bool, version: SchemaVersion) -> TaxCategory {
    use SchemaVersion::{Current, Legacy};
    use TaxCategory::{Exempt, OutOfScope, ReverseCharge, Standard, ZeroRated};
    use TaxRate::{Reduced, Zero};

    match (version, reverse_charge, rate) {
        (Legacy, false, Zero) => ZeroRated,
        (Current, false, Zero) => Exempt,
        (_, false, _) => Standard,
        (Current, true, Zero) => OutOfScope,
        (Legacy, true, _) | (Current, true, Reduced | TaxRate::Standard) => ReverseCharge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(SchemaVersion::Legacy, false, TaxRate::Zero, "Z")]
    #[case(SchemaVersion::Legacy, false, TaxRate::Reduced, "S")]
    #[case(SchemaVersion::Legacy, false, TaxRate::Standard, "S")]
    #[case(SchemaVersion::Legacy, true, TaxRate::Zero, "AE")]
    #[case(SchemaVersion::Legacy, true, TaxRate::Reduced, "AE")]
    #[case(SchemaVersion::Legacy, true, TaxRate::Standard, "AE")]
    #[case(SchemaVersion::Current, false, TaxRate::Zero, "E")]
    #[case(SchemaVersion::Current, false, TaxRate::Reduced, "S")]
    #[case(SchemaVersion::Current, false, TaxRate::Standard, "S")]
    #[case(SchemaVersion::Current, true, TaxRate::Zero, "O")]
    #[case(SchemaVersion::Current, true, TaxRate::Reduced, "AE")]
    #[case(SchemaVersion::Current, true, TaxRate::Standard, "AE")]
    fn test_tax_category_table(
        #[case] version: SchemaVersion,
        #[case] reverse_charge: bool,
        #[case] rate: TaxRate,
        #[case] expected: &str,
    ) {
        assert_eq!(tax_category(rate, reverse_charge, version).code(), expected);
    }

    #[test]
    fn test_version_uses_issue_date_not_today() {
        let cutover = date(2024, 1, 1);
        assert_eq!(
            SchemaVersion::for_issue_date(date(2023, 12, 31), cutover),
            SchemaVersion::Legacy
        );
        assert_eq!(
            SchemaVersion::for_issue_date(date(2024, 1, 1), cutover),
            SchemaVersion::Current
        );
        assert_eq!(
            SchemaVersion::for_issue_date(date(2030, 6, 1), cutover),
            SchemaVersion::Current
        );
    }

    #[test]
    fn test_exemption_reason_requirement() {
        assert!(!TaxCategory::Standard.needs_exemption_reason());
        assert!(TaxCategory::Exempt.needs_exemption_reason());
        assert!(TaxCategory::ReverseCharge.needs_exemption_reason());
    }
}
