//! Property-based tests for document validation.
//!
//! Validation must be exhaustive: blanking any combination of mandatory
//! fields yields exactly one violation per blanked field.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::{DocumentLine, DocumentType, FinancialDocument, Party, TaxRate};
use super::validation::{ValidationCode, validate_document};

fn valid_document() -> FinancialDocument {
    let party = |tax_id: &str, name: &str| Party {
        tax_id: tax_id.to_string(),
        name: name.to_string(),
        address: "Knez Mihailova 10".to_string(),
        city: "Beograd".to_string(),
        ..Party::default()
    };
    FinancialDocument {
        number: "INV-1".to_string(),
        issue_date: NaiveDate::from_ymd_opt(2024, 5, 1),
        due_date: None,
        currency_code: "RSD".to_string(),
        document_type: DocumentType::Regular,
        reverse_charge: false,
        tax_exemption_reason_code: None,
        note: None,
        billing_reference: None,
        supplier: party("101234569", "Supplier"),
        buyer: party("107654324", "Buyer"),
        lines: vec![DocumentLine {
            description: "Item".to_string(),
            quantity: Decimal::ONE,
            unit_code: "H87".to_string(),
            unit_price: Decimal::from(100),
            line_total: Decimal::from(100),
            tax_amount: Decimal::from(20),
            tax_rate: TaxRate::Standard,
            item_type: None,
        }],
        subtotal: Decimal::from(100),
        tax_amount: Decimal::from(20),
        total: Decimal::from(120),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_one_error_per_blanked_field(blank in prop::collection::vec(any::<bool>(), 9)) {
        let mut doc = valid_document();
        if blank[0] { doc.number.clear(); }
        if blank[1] { doc.currency_code.clear(); }
        if blank[2] { doc.supplier.tax_id.clear(); }
        if blank[3] { doc.supplier.name.clear(); }
        if blank[4] { doc.supplier.address.clear(); }
        if blank[5] { doc.supplier.city.clear(); }
        if blank[6] { doc.buyer.tax_id.clear(); }
        if blank[7] { doc.buyer.name.clear(); }
        if blank[8] { doc.lines.clear(); }

        let errors = validate_document(&doc);
        let expected = blank.iter().filter(|b| **b).count();
        prop_assert_eq!(errors.len(), expected, "errors: {:?}", errors);
        prop_assert!(errors.iter().all(|e| matches!(
            e.code,
            ValidationCode::Required | ValidationCode::NoLines
        )));
    }

    #[test]
    fn prop_non_positive_quantity_rejected(quantity in -1_000_000i64..=0) {
        let mut doc = valid_document();
        doc.lines[0].quantity = Decimal::new(quantity, 2);

        let errors = validate_document(&doc);
        prop_assert!(errors.iter().any(|e| e.field == "lines[0].quantity"
            && e.code == ValidationCode::NotPositive));
    }
}
