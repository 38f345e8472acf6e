//! Application configuration management.
//!
//! The chart-of-accounts codes used by the posting engine and the e-invoice
//! schema cutover date are jurisdiction-specific, so they are configuration
//! rather than literals in the core. Every field has a default, which makes
//! an empty configuration valid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::DEFAULT_TOLERANCE;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Posting rule configuration.
    #[serde(default)]
    pub posting: PostingConfig,
    /// E-invoice generation configuration.
    #[serde(default)]
    pub einvoice: EInvoiceConfig,
    /// Ledger aggregation configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// A ledger account reference: code plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRef {
    /// Account code in the statutory chart of accounts.
    pub code: String,
    /// Account name.
    pub name: String,
}

impl AccountRef {
    /// Creates a new account reference.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Account table used to derive ledger lines from business documents.
#[derive(Debug, Clone, Deserialize)]
pub struct PostingConfig {
    /// Receivable account debited for regular invoices.
    #[serde(default = "default_receivable")]
    pub receivable: AccountRef,
    /// Receivable account substituted for advance-payment invoices.
    #[serde(default = "default_advance_receivable")]
    pub advance_receivable: AccountRef,
    /// Output VAT account.
    #[serde(default = "default_output_tax")]
    pub output_tax: AccountRef,
    /// Revenue account for goods.
    #[serde(default = "default_revenue_goods")]
    pub revenue_goods: AccountRef,
    /// Revenue account for own products.
    #[serde(default = "default_revenue_product")]
    pub revenue_product: AccountRef,
    /// Revenue account for services.
    #[serde(default = "default_revenue_service")]
    pub revenue_service: AccountRef,
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            receivable: default_receivable(),
            advance_receivable: default_advance_receivable(),
            output_tax: default_output_tax(),
            revenue_goods: default_revenue_goods(),
            revenue_product: default_revenue_product(),
            revenue_service: default_revenue_service(),
        }
    }
}

fn default_receivable() -> AccountRef {
    AccountRef::new("2040", "Kupci u zemlji")
}

fn default_advance_receivable() -> AccountRef {
    AccountRef::new("2050", "Kupci po avansnim računima")
}

fn default_output_tax() -> AccountRef {
    AccountRef::new("4700", "Obaveze za PDV")
}

fn default_revenue_goods() -> AccountRef {
    AccountRef::new("6040", "Prihodi od prodaje robe")
}

fn default_revenue_product() -> AccountRef {
    AccountRef::new("6140", "Prihodi od prodaje proizvoda")
}

fn default_revenue_service() -> AccountRef {
    AccountRef::new("6500", "Prihodi od usluga")
}

/// E-invoice configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EInvoiceConfig {
    /// Documents issued on or after this date use the current tax category
    /// code table; earlier documents use the legacy table.
    #[serde(default = "default_tax_category_cutover")]
    pub tax_category_cutover: NaiveDate,
}

impl Default for EInvoiceConfig {
    fn default() -> Self {
        Self {
            tax_category_cutover: default_tax_category_cutover(),
        }
    }
}

fn default_tax_category_cutover() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Maximum difference tolerated when checking balance identities.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: Decimal,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

fn default_balance_tolerance() -> Decimal {
    DEFAULT_TOLERANCE
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `RACUN__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RACUN").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration from an explicit file, still honoring
    /// `RACUN__*` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("RACUN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
