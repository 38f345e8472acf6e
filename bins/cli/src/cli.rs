//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use racun_shared::types::TenantId;

/// Generate e-invoices and payroll declarations, post documents, and
/// report on the ledger.
#[derive(Debug, Parser)]
#[command(name = "racun", version, about)]
pub struct Cli {
    /// Configuration file. Defaults to `config/default` plus `config/{RUN_MODE}`.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a document and render it as a UBL e-invoice.
    Einvoice(DocumentArgs),
    /// Render a PPP-PD payroll tax declaration.
    Payroll(IoArgs),
    /// Derive the journal entry for a document.
    Post(PostArgs),
    /// Trial balance as of a date.
    TrialBalance(AsOfArgs),
    /// Balance sheet as of a date.
    BalanceSheet(AsOfArgs),
    /// Income statement for a period.
    IncomeStatement(PeriodArgs),
    /// Chronological lines of one account with running balance.
    AccountLedger(AccountLedgerArgs),
}

/// Input file and output destination.
#[derive(Debug, Args)]
pub struct IoArgs {
    /// JSON input file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for commands that take one financial document.
#[derive(Debug, Args)]
pub struct DocumentArgs {
    #[command(flatten)]
    pub io: IoArgs,
}

/// Arguments for `post`.
#[derive(Debug, Args)]
pub struct PostArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Tenant owning the entry.
    #[arg(long)]
    pub tenant: TenantId,

    /// Post the entry instead of leaving it as a draft.
    #[arg(long)]
    pub commit: bool,
}

/// Ledger input shared by the report commands.
#[derive(Debug, Args)]
pub struct LedgerArgs {
    /// JSON array of journal entries.
    #[arg(short, long)]
    pub entries: PathBuf,

    /// JSON chart of accounts (code to name and type). Codes not listed
    /// are classified by their first digit.
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Tenant to report on.
    #[arg(long)]
    pub tenant: TenantId,

    /// Reporting currency.
    #[arg(long, default_value = "RSD")]
    pub currency: String,

    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for point-in-time reports.
#[derive(Debug, Args)]
pub struct AsOfArgs {
    #[command(flatten)]
    pub ledger: LedgerArgs,

    /// Report date (YYYY-MM-DD).
    #[arg(long)]
    pub as_of: NaiveDate,
}

/// Arguments for period reports.
#[derive(Debug, Args)]
pub struct PeriodArgs {
    #[command(flatten)]
    pub ledger: LedgerArgs,

    /// First day of the period (YYYY-MM-DD).
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the period (YYYY-MM-DD).
    #[arg(long)]
    pub to: NaiveDate,
}

/// Arguments for `account-ledger`.
#[derive(Debug, Args)]
pub struct AccountLedgerArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Account code.
    #[arg(long)]
    pub account: String,
}
