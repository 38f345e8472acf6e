//! UBL 2.1 e-invoice mapper (EN 16931 with the national extension).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use racun_shared::config::EInvoiceConfig;
use racun_shared::types::{format_amount, format_quantity, format_trimmed};

use super::tax_category::{SchemaVersion, TaxCategory, tax_category};
use super::{DocumentMapper, MappingError, format_date, require};
use crate::document::{DocumentLine, FinancialDocument, Party, TaxRate};
use crate::xml::XmlBuilder;

const NS_INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2";
const NS_CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2";
const NS_CAC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2";
const NS_CBC: &str = "urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2";

/// Electronic address scheme for Serbian tax identifiers.
const ENDPOINT_SCHEME: &str = "9948";
/// UNCL 4461 credit transfer.
const PAYMENT_MEANS_CREDIT_TRANSFER: &str = "30";
const DEFAULT_COUNTRY: &str = "RS";
const VAT_SCHEME: &str = "VAT";

/// Element names that differ between invoices and credit notes.
struct Layout {
    root: &'static str,
    namespace: &'static str,
    type_code: &'static str,
    line: &'static str,
    quantity: &'static str,
}

const INVOICE_LAYOUT: Layout = Layout {
    root: "Invoice",
    namespace: NS_INVOICE,
    type_code: "cbc:InvoiceTypeCode",
    line: "cac:InvoiceLine",
    quantity: "cbc:InvoicedQuantity",
};

const CREDIT_NOTE_LAYOUT: Layout = Layout {
    root: "CreditNote",
    namespace: NS_CREDIT_NOTE,
    type_code: "cbc:CreditNoteTypeCode",
    line: "cac:CreditNoteLine",
    quantity: "cbc:CreditedQuantity",
};

/// One `cac:TaxSubtotal`: lines sharing a category and rate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaxSubtotal {
    category: TaxCategory,
    rate: TaxRate,
    taxable: Decimal,
    tax: Decimal,
}

/// Maps a [`FinancialDocument`] to a UBL `Invoice` or `CreditNote`.
#[derive(Debug, Clone)]
pub struct EInvoiceMapper {
    cutover: NaiveDate,
}

impl EInvoiceMapper {
    /// Creates a mapper switching tax category tables at `cutover`.
    #[must_use]
    pub fn new(cutover: NaiveDate) -> Self {
        Self { cutover }
    }

    /// Creates a mapper from configuration.
    #[must_use]
    pub fn from_config(config: &EInvoiceConfig) -> Self {
        Self::new(config.tax_category_cutover)
    }

    /// Schema version applied to a document issued on `issue_date`.
    #[must_use]
    pub fn schema_version(&self, issue_date: NaiveDate) -> SchemaVersion {
        SchemaVersion::for_issue_date(issue_date, self.cutover)
    }

    fn check_preconditions(document: &FinancialDocument) -> Result<NaiveDate, MappingError> {
        require("number", &document.number)?;
        require("currency_code", &document.currency_code)?;
        require("supplier.tax_id", &document.supplier.tax_id)?;
        require("buyer.tax_id", &document.buyer.tax_id)?;
        if document.lines.is_empty() {
            return Err(MappingError::precondition("lines", "at least one line required"));
        }
        document
            .issue_date
            .ok_or_else(|| MappingError::precondition("issue_date", "must be set"))
    }
}

impl DocumentMapper for EInvoiceMapper {
    type Document = FinancialDocument;

    fn map_to_xml(
        &self,
        document: &FinancialDocument,
        b: &mut XmlBuilder,
    ) -> Result<(), MappingError> {
        let issue_date = Self::check_preconditions(document)?;
        let version = self.schema_version(issue_date);
        let credit_note = document.document_type.is_credit_note();
        let layout = if credit_note {
            &CREDIT_NOTE_LAYOUT
        } else {
            &INVOICE_LAYOUT
        };
        let currency = document.currency_code.as_str();

        b.declaration();
        b.open_tag(
            layout.root,
            &[
                ("xmlns", layout.namespace),
                ("xmlns:cac", NS_CAC),
                ("xmlns:cbc", NS_CBC),
            ],
        )?;

        b.text_element("cbc:CustomizationID", version.customization_id())?;
        b.text_element("cbc:ID", &document.number)?;
        b.text_element("cbc:IssueDate", &format_date(issue_date))?;
        // UBL 2.1 credit notes have no document-level due date.
        let due_date = document.due_date.map(format_date);
        b.element_if(!credit_note, "cbc:DueDate", due_date.as_deref(), &[])?;
        b.text_element(layout.type_code, document.document_type.type_code())?;
        b.element("cbc:Note", document.note.as_deref(), &[])?;
        b.text_element("cbc:DocumentCurrencyCode", currency)?;

        if document.document_type.is_correction()
            && let Some(reference) = document.billing_reference.as_deref()
        {
            b.open_tag("cac:BillingReference", &[])?;
            b.open_tag("cac:InvoiceDocumentReference", &[])?;
            b.text_element("cbc:ID", reference)?;
            b.close_tag("cac:InvoiceDocumentReference")?;
            b.close_tag("cac:BillingReference")?;
        }

        write_party(b, "cac:AccountingSupplierParty", &document.supplier)?;
        write_party(b, "cac:AccountingCustomerParty", &document.buyer)?;

        if let Some(account) = document.supplier.bank_account.as_deref() {
            b.open_tag("cac:PaymentMeans", &[])?;
            b.text_element("cbc:PaymentMeansCode", PAYMENT_MEANS_CREDIT_TRANSFER)?;
            b.text_element("cbc:PaymentID", &document.number)?;
            b.open_tag("cac:PayeeFinancialAccount", &[])?;
            b.text_element("cbc:ID", account)?;
            b.close_tag("cac:PayeeFinancialAccount")?;
            b.close_tag("cac:PaymentMeans")?;
        }

        b.open_tag("cac:TaxTotal", &[])?;
        amount(b, "cbc:TaxAmount", document.tax_amount, currency)?;
        for subtotal in tax_subtotals(&document.lines, document.reverse_charge, version) {
            b.open_tag("cac:TaxSubtotal", &[])?;
            amount(b, "cbc:TaxableAmount", subtotal.taxable, currency)?;
            amount(b, "cbc:TaxAmount", subtotal.tax, currency)?;
            b.open_tag("cac:TaxCategory", &[])?;
            b.text_element("cbc:ID", subtotal.category.code())?;
            b.text_element("cbc:Percent", &subtotal.rate.percent().to_string())?;
            b.element(
                "cbc:TaxExemptionReasonCode",
                exemption_reason(document, subtotal.category),
                &[],
            )?;
            tax_scheme(b)?;
            b.close_tag("cac:TaxCategory")?;
            b.close_tag("cac:TaxSubtotal")?;
        }
        b.close_tag("cac:TaxTotal")?;

        b.open_tag("cac:LegalMonetaryTotal", &[])?;
        amount(b, "cbc:LineExtensionAmount", document.subtotal, currency)?;
        amount(b, "cbc:TaxExclusiveAmount", document.subtotal, currency)?;
        amount(b, "cbc:TaxInclusiveAmount", document.total, currency)?;
        amount(b, "cbc:PayableAmount", document.total, currency)?;
        b.close_tag("cac:LegalMonetaryTotal")?;

        for (index, line) in document.lines.iter().enumerate() {
            let category = tax_category(line.tax_rate, document.reverse_charge, version);
            b.open_tag(layout.line, &[])?;
            b.text_element("cbc:ID", &(index + 1).to_string())?;
            b.element(
                layout.quantity,
                Some(format_quantity(line.quantity).as_str()),
                &[("unitCode", line.unit_code.as_str())],
            )?;
            amount(b, "cbc:LineExtensionAmount", line.line_total, currency)?;
            b.open_tag("cac:Item", &[])?;
            b.text_element("cbc:Name", &line.description)?;
            b.open_tag("cac:ClassifiedTaxCategory", &[])?;
            b.text_element("cbc:ID", category.code())?;
            b.text_element("cbc:Percent", &line.tax_rate.percent().to_string())?;
            tax_scheme(b)?;
            b.close_tag("cac:ClassifiedTaxCategory")?;
            b.close_tag("cac:Item")?;
            b.open_tag("cac:Price", &[])?;
            b.element(
                "cbc:PriceAmount",
                Some(format_trimmed(line.unit_price).as_str()),
                &[("currencyID", currency)],
            )?;
            b.close_tag("cac:Price")?;
            b.close_tag(layout.line)?;
        }

        b.close_tag(layout.root)?;
        Ok(())
    }
}

fn amount(
    b: &mut XmlBuilder,
    name: &str,
    value: Decimal,
    currency: &str,
) -> Result<(), MappingError> {
    b.element(name, Some(format_amount(value).as_str()), &[("currencyID", currency)])?;
    Ok(())
}

fn tax_scheme(b: &mut XmlBuilder) -> Result<(), MappingError> {
    b.open_tag("cac:TaxScheme", &[])?;
    b.text_element("cbc:ID", VAT_SCHEME)?;
    b.close_tag("cac:TaxScheme")?;
    Ok(())
}

/// VATEX code for a non-standard category. A missing code is logged and
/// the element left out.
fn exemption_reason(document: &FinancialDocument, category: TaxCategory) -> Option<&str> {
    if !category.needs_exemption_reason() {
        return None;
    }
    let reason = document.tax_exemption_reason_code.as_deref();
    if reason.is_none_or(|code| code.trim().is_empty()) {
        warn!(
            document = %document.number,
            category = category.code(),
            "tax category requires an exemption reason code but none was given"
        );
        return None;
    }
    reason
}

fn write_party(b: &mut XmlBuilder, wrapper: &str, party: &Party) -> Result<(), MappingError> {
    b.open_tag(wrapper, &[])?;
    b.open_tag("cac:Party", &[])?;
    b.element(
        "cbc:EndpointID",
        Some(party.tax_id.as_str()),
        &[("schemeID", ENDPOINT_SCHEME)],
    )?;

    b.open_tag("cac:PartyName", &[])?;
    b.text_element("cbc:Name", &party.name)?;
    b.close_tag("cac:PartyName")?;

    b.open_tag("cac:PostalAddress", &[])?;
    b.element_if(
        !party.address.is_empty(),
        "cbc:StreetName",
        Some(party.address.as_str()),
        &[],
    )?;
    b.element_if(!party.city.is_empty(), "cbc:CityName", Some(party.city.as_str()), &[])?;
    b.element("cbc:PostalZone", party.postal_code.as_deref(), &[])?;
    b.open_tag("cac:Country", &[])?;
    b.text_element(
        "cbc:IdentificationCode",
        party.country_code.as_deref().unwrap_or(DEFAULT_COUNTRY),
    )?;
    b.close_tag("cac:Country")?;
    b.close_tag("cac:PostalAddress")?;

    b.open_tag("cac:PartyTaxScheme", &[])?;
    b.text_element("cbc:CompanyID", &format!("{DEFAULT_COUNTRY}{}", party.tax_id))?;
    tax_scheme(b)?;
    b.close_tag("cac:PartyTaxScheme")?;

    b.open_tag("cac:PartyLegalEntity", &[])?;
    b.text_element("cbc:RegistrationName", &party.name)?;
    b.element("cbc:CompanyID", party.registration_number.as_deref(), &[])?;
    b.close_tag("cac:PartyLegalEntity")?;

    if let Some(email) = party.email.as_deref() {
        b.open_tag("cac:Contact", &[])?;
        b.text_element("cbc:ElectronicMail", email)?;
        b.close_tag("cac:Contact")?;
    }

    b.close_tag("cac:Party")?;
    b.close_tag(wrapper)?;
    Ok(())
}

/// Groups lines by (category, rate), preserving first-appearance order.
fn tax_subtotals(
    lines: &[DocumentLine],
    reverse_charge: bool,
    version: SchemaVersion,
) -> Vec<TaxSubtotal> {
    let mut subtotals: Vec<TaxSubtotal> = Vec::new();
    for line in lines {
        let category = tax_category(line.tax_rate, reverse_charge, version);
        match subtotals
            .iter_mut()
            .find(|s| s.category == category && s.rate == line.tax_rate)
        {
            Some(existing) => {
                existing.taxable += line.line_total;
                existing.tax += line.tax_amount;
            }
            None => subtotals.push(TaxSubtotal {
                category,
                rate: line.tax_rate,
                taxable: line.line_total,
                tax: line.tax_amount,
            }),
        }
    }
    subtotals
}
