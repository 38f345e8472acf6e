//! Payroll tax declaration (PPP-PD) records.

pub mod types;

pub use types::{Employer, EmployeeTaxLine, PayrollPeriod, PayrollTaxDeclaration, PayrollTotals};
