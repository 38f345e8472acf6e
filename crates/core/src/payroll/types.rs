//! Payroll declaration types.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use racun_shared::types::round_amount;

/// A calendar month for which payroll is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Year.
    pub year: i32,
    /// Month, 1 through 12.
    pub month: u32,
}

impl PayrollPeriod {
    /// Creates a period, returning `None` for a month outside 1..=12.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Returns true if the month is in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The paying entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// Tax identifier (PIB).
    pub tax_id: String,
    /// Company registration number.
    #[serde(default)]
    pub registration_number: String,
    /// Legal name.
    pub name: String,
}

/// Withholding figures for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTaxLine {
    /// 13-digit national personal identifier.
    #[serde(default)]
    pub national_id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Income type code (e.g. `101` for regular salary).
    pub income_type_code: String,
    /// Personal allowance code, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance_code: Option<String>,
    /// Gross income.
    pub gross: Decimal,
    /// Taxable base.
    pub tax_base: Decimal,
    /// Income tax withheld.
    pub tax: Decimal,
    /// Contributions borne by the employee.
    pub employee_contributions: Decimal,
    /// Contributions borne by the employer.
    pub employer_contributions: Decimal,
    /// Net pay.
    pub net: Decimal,
    /// Municipal surtax.
    #[serde(default)]
    pub municipal_surtax: Decimal,
}

/// A payroll tax declaration for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxDeclaration {
    /// Declared period.
    pub period: PayrollPeriod,
    /// Date the payroll was computed.
    pub calculation_date: NaiveDate,
    /// Date the payroll was paid.
    pub payment_date: NaiveDate,
    /// Paying entity.
    pub employer: Employer,
    /// Per-employee lines, in declaration order.
    #[serde(default)]
    pub employees: Vec<EmployeeTaxLine>,
}

impl PayrollTaxDeclaration {
    /// Folds the employee lines into declaration totals.
    #[must_use]
    pub fn totals(&self) -> PayrollTotals {
        PayrollTotals::from_lines(&self.employees)
    }
}

/// Declaration totals, always derived from the employee lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PayrollTotals {
    /// Number of employee lines.
    pub employee_count: usize,
    /// Total gross income.
    pub gross: Decimal,
    /// Total taxable base.
    pub tax_base: Decimal,
    /// Total income tax.
    pub tax: Decimal,
    /// Total employee contributions.
    pub employee_contributions: Decimal,
    /// Total employer contributions.
    pub employer_contributions: Decimal,
    /// Total net pay.
    pub net: Decimal,
    /// Total municipal surtax.
    pub municipal_surtax: Decimal,
}

impl PayrollTotals {
    /// Sums every figure over `lines`.
    ///
    /// Each figure is rounded to two decimals before it is added, the same
    /// way it is declared per employee, so a total always equals the sum of
    /// the declared lines.
    #[must_use]
    pub fn from_lines(lines: &[EmployeeTaxLine]) -> Self {
        lines.iter().fold(Self::default(), |acc, line| Self {
            employee_count: acc.employee_count + 1,
            gross: acc.gross + round_amount(line.gross),
            tax_base: acc.tax_base + round_amount(line.tax_base),
            tax: acc.tax + round_amount(line.tax),
            employee_contributions: acc.employee_contributions
                + round_amount(line.employee_contributions),
            employer_contributions: acc.employer_contributions
                + round_amount(line.employer_contributions),
            net: acc.net + round_amount(line.net),
            municipal_surtax: acc.municipal_surtax + round_amount(line.municipal_surtax),
        })
    }
}
