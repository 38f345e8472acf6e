//! PPP-PD payroll tax declaration mapper.
//!
//! Every employee's national identifier is checked before generation. A bad
//! identifier never blocks the declaration: it is logged, embedded as a
//! comment at the top of the document, and returned to the caller so the
//! record can be corrected by hand.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use racun_shared::types::format_amount;

use super::{DocumentMapper, MappingError, format_date, require};
use crate::identifier::is_valid_national_id;
use crate::payroll::{EmployeeTaxLine, PayrollTaxDeclaration, PayrollTotals};
use crate::xml::XmlBuilder;

const ROOT: &str = "tns:PodaciPoreskeDeklaracije";
const NAMESPACE: &str = "http://pid.purs.gov.rs";
/// Original filing.
const FILING_KIND_ORIGINAL: &str = "1";
/// Legal entity paying the income.
const PAYER_KIND_LEGAL_ENTITY: &str = "1";
/// Recipient identified by national personal identifier.
const RECIPIENT_ID_KIND_NATIONAL: &str = "1";

/// Outcome of checking one employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum EmployeeCheck {
    /// The record can be declared as is.
    Valid,
    /// The record is declared but needs manual correction.
    Warning(String),
}

impl EmployeeCheck {
    /// Checks an employee's national identifier.
    #[must_use]
    pub fn classify(ordinal: usize, line: &EmployeeTaxLine) -> Self {
        let who = format!("{} {}", line.first_name, line.last_name);
        if line.national_id.trim().is_empty() {
            Self::Warning(format!("Employee #{ordinal} ({who}): national ID is missing"))
        } else if !is_valid_national_id(&line.national_id) {
            Self::Warning(format!(
                "Employee #{ordinal} ({who}): national ID '{}' failed checksum validation",
                line.national_id
            ))
        } else {
            Self::Valid
        }
    }

    /// Returns the warning message, if any.
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Warning(message) => Some(message),
        }
    }
}

/// A generated declaration together with its data-quality warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollXml {
    /// The XML document.
    pub xml: String,
    /// One message per employee record needing correction.
    pub warnings: Vec<String>,
}

/// Maps a [`PayrollTaxDeclaration`] to the PPP-PD XML schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayrollMapper;

impl PayrollMapper {
    /// Creates a new mapper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generates the declaration, collecting identifier warnings.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Precondition`] if the employer tax identifier
    /// is missing or the period month is out of range.
    pub fn generate(&self, declaration: &PayrollTaxDeclaration) -> Result<PayrollXml, MappingError> {
        let warnings = check_employees(declaration);
        let mut builder = XmlBuilder::new();
        write_declaration(declaration, &warnings, &mut builder)?;
        Ok(PayrollXml {
            xml: builder.build()?,
            warnings,
        })
    }
}

impl DocumentMapper for PayrollMapper {
    type Document = PayrollTaxDeclaration;

    fn map_to_xml(
        &self,
        declaration: &PayrollTaxDeclaration,
        builder: &mut XmlBuilder,
    ) -> Result<(), MappingError> {
        let warnings = check_employees(declaration);
        write_declaration(declaration, &warnings, builder)
    }
}

fn check_employees(declaration: &PayrollTaxDeclaration) -> Vec<String> {
    declaration
        .employees
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            EmployeeCheck::classify(index + 1, line)
                .warning()
                .map(str::to_string)
        })
        .inspect(|message| warn!(period = %declaration.period, %message, "payroll record flagged"))
        .collect()
}

fn write_declaration(
    declaration: &PayrollTaxDeclaration,
    warnings: &[String],
    b: &mut XmlBuilder,
) -> Result<(), MappingError> {
    require("employer.tax_id", &declaration.employer.tax_id)?;
    if !declaration.period.is_valid() {
        return Err(MappingError::precondition(
            "period.month",
            format!("{} is not a month", declaration.period.month),
        ));
    }

    b.declaration();
    b.open_tag(ROOT, &[("xmlns:tns", NAMESPACE)])?;
    for message in warnings {
        b.comment(&format!("WARNING: {message}"));
    }

    b.open_tag("tns:PodaciOPrijavi", &[])?;
    b.text_element("tns:VrstaPrijave", FILING_KIND_ORIGINAL)?;
    b.text_element("tns:ObracunskiPeriod", &declaration.period.to_string())?;
    b.text_element("tns:DatumObracuna", &format_date(declaration.calculation_date))?;
    b.text_element("tns:DatumPlacanja", &format_date(declaration.payment_date))?;
    b.close_tag("tns:PodaciOPrijavi")?;

    let employer = &declaration.employer;
    b.open_tag("tns:PodaciOIsplatiocu", &[])?;
    b.text_element("tns:TipIsplatioca", PAYER_KIND_LEGAL_ENTITY)?;
    b.text_element("tns:PoreskiIdentifikacioniBroj", &employer.tax_id)?;
    b.element_if(
        !employer.registration_number.is_empty(),
        "tns:MaticniBrojIsplatioca",
        Some(employer.registration_number.as_str()),
        &[],
    )?;
    b.text_element("tns:NazivPrezimeIme", &employer.name)?;
    b.close_tag("tns:PodaciOIsplatiocu")?;

    b.open_tag("tns:DeklarisaniPodaciOVrstamaPrihoda", &[])?;
    for (index, line) in declaration.employees.iter().enumerate() {
        b.open_tag("tns:PodaciOVrstamaPrihoda", &[])?;
        b.text_element("tns:RedniBroj", &(index + 1).to_string())?;
        b.text_element("tns:VrstaIdentifikatoraPrimaoca", RECIPIENT_ID_KIND_NATIONAL)?;
        b.text_element("tns:IdentifikatorPrimaoca", &line.national_id)?;
        b.text_element("tns:Prezime", &line.last_name)?;
        b.text_element("tns:Ime", &line.first_name)?;
        b.text_element("tns:SifraVrstePrihoda", &line.income_type_code)?;
        b.element("tns:SifraOlaksice", line.allowance_code.as_deref(), &[])?;
        amount(b, "tns:Bruto", line.gross)?;
        amount(b, "tns:OsnovicaPorez", line.tax_base)?;
        amount(b, "tns:Porez", line.tax)?;
        amount(b, "tns:DoprinosiNaTeretZaposlenog", line.employee_contributions)?;
        amount(b, "tns:DoprinosiNaTeretPoslodavca", line.employer_contributions)?;
        amount(b, "tns:Neto", line.net)?;
        amount(b, "tns:Prirez", line.municipal_surtax)?;
        b.close_tag("tns:PodaciOVrstamaPrihoda")?;
    }
    b.close_tag("tns:DeklarisaniPodaciOVrstamaPrihoda")?;

    let totals = PayrollTotals::from_lines(&declaration.employees);
    b.open_tag("tns:UkupniPodaci", &[])?;
    b.text_element("tns:BrojPrimalaca", &totals.employee_count.to_string())?;
    amount(b, "tns:UkupnoBruto", totals.gross)?;
    amount(b, "tns:UkupnoOsnovicaPorez", totals.tax_base)?;
    amount(b, "tns:UkupnoPorez", totals.tax)?;
    amount(b, "tns:UkupnoDoprinosiNaTeretZaposlenog", totals.employee_contributions)?;
    amount(b, "tns:UkupnoDoprinosiNaTeretPoslodavca", totals.employer_contributions)?;
    amount(b, "tns:UkupnoNeto", totals.net)?;
    amount(b, "tns:UkupnoPrirez", totals.municipal_surtax)?;
    b.close_tag("tns:UkupniPodaci")?;

    b.close_tag(ROOT)?;
    Ok(())
}

fn amount(b: &mut XmlBuilder, name: &str, value: Decimal) -> Result<(), MappingError> {
    b.text_element(name, &format_amount(value))?;
    Ok(())
}
