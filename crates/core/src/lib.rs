//! Core business logic for Racun.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! Callers hand in validated records and receive XML documents, journal
//! lines, and reports back.
//!
//! # Modules
//!
//! - `document` - Financial documents and their validation
//! - `identifier` - National ID and tax ID checksums
//! - `xml` - Structured, escaping XML builder
//! - `mapper` - E-invoice and payroll declaration mappers
//! - `payroll` - Payroll tax declaration records
//! - `posting` - Document to journal line derivation
//! - `ledger` - Double-entry bookkeeping and aggregation
//! - `reports` - Trial balance, balance sheet, income statement

pub mod document;
pub mod error;
pub mod identifier;
pub mod ledger;
pub mod mapper;
pub mod payroll;
pub mod posting;
pub mod reports;
pub mod xml;

pub use error::validation_failure;
