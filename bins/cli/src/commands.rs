//! Subcommand handlers.
//!
//! Each handler reads JSON input, calls into `racun-core`, and writes the
//! result. Failures surface as [`AppError`] wrapped in `anyhow` context.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use racun_core::document::{FinancialDocument, validate_document};
use racun_core::ledger::{ChartOfAccounts, JournalEntry, LedgerAggregator};
use racun_core::mapper::{DocumentMapper, EInvoiceMapper, PayrollMapper};
use racun_core::payroll::PayrollTaxDeclaration;
use racun_core::posting::PostingEngine;
use racun_core::reports::{ReportPeriod, ReportService};
use racun_core::validation_failure;
use racun_shared::{AppConfig, AppError};

use crate::cli::{AccountLedgerArgs, AsOfArgs, Command, DocumentArgs, IoArgs, LedgerArgs, PeriodArgs, PostArgs};

/// Dispatches one subcommand.
pub fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Einvoice(args) => einvoice(&args, config),
        Command::Payroll(args) => payroll(&args),
        Command::Post(args) => post(&args, config),
        Command::TrialBalance(args) => trial_balance(&args, config),
        Command::BalanceSheet(args) => balance_sheet(&args, config),
        Command::IncomeStatement(args) => income_statement(&args, config),
        Command::AccountLedger(args) => account_ledger(&args, config),
    }
}

fn einvoice(args: &DocumentArgs, config: &AppConfig) -> anyhow::Result<()> {
    let document = load_document(&args.io.input)?;
    let mapper = EInvoiceMapper::from_config(&config.einvoice);
    let xml = mapper.to_xml(&document).map_err(AppError::from)?;
    info!(
        document = %document.number,
        schema = ?document.issue_date.map(|d| mapper.schema_version(d)),
        "e-invoice generated"
    );
    write_output(args.io.output.as_deref(), &xml)
}

fn payroll(args: &IoArgs) -> anyhow::Result<()> {
    let declaration: PayrollTaxDeclaration = read_json(&args.input)?;
    let generated = PayrollMapper::new()
        .generate(&declaration)
        .map_err(AppError::from)?;
    for message in &generated.warnings {
        eprintln!("warning: {message}");
    }
    info!(
        period = %declaration.period,
        employees = declaration.employees.len(),
        warnings = generated.warnings.len(),
        "payroll declaration generated"
    );
    write_output(args.output.as_deref(), &generated.xml)
}

fn post(args: &PostArgs, config: &AppConfig) -> anyhow::Result<()> {
    let document = load_document(&args.io.input)?;
    let engine = PostingEngine::from_config(&config.posting);
    let Some(draft) = engine
        .draft_entry(args.tenant, &document)
        .map_err(AppError::from)?
    else {
        warn!(document = %document.number, "document has nothing to post");
        return write_json(args.io.output.as_deref(), &Option::<JournalEntry>::None);
    };
    let entry = if args.commit {
        draft.post().map_err(AppError::from)?
    } else {
        draft
    };
    info!(
        document = %document.number,
        entry = %entry.id,
        status = %entry.status,
        lines = entry.lines.len(),
        "journal entry derived"
    );
    write_json(args.io.output.as_deref(), &Some(entry))
}

fn trial_balance(args: &AsOfArgs, config: &AppConfig) -> anyhow::Result<()> {
    let (service, entries) = load_ledger(&args.ledger, config)?;
    let report = service
        .trial_balance(&entries, args.as_of)
        .map_err(AppError::from)?;
    write_json(args.ledger.output.as_deref(), &report)
}

fn balance_sheet(args: &AsOfArgs, config: &AppConfig) -> anyhow::Result<()> {
    let (service, entries) = load_ledger(&args.ledger, config)?;
    let report = service
        .balance_sheet(&entries, args.as_of)
        .map_err(AppError::from)?;
    write_json(args.ledger.output.as_deref(), &report)
}

fn income_statement(args: &PeriodArgs, config: &AppConfig) -> anyhow::Result<()> {
    let (service, entries) = load_ledger(&args.ledger, config)?;
    let report = service
        .income_statement(&entries, period(args)?)
        .map_err(AppError::from)?;
    write_json(args.ledger.output.as_deref(), &report)
}

fn account_ledger(args: &AccountLedgerArgs, config: &AppConfig) -> anyhow::Result<()> {
    let (service, entries) = load_ledger(&args.period.ledger, config)?;
    let report = service
        .account_ledger(&entries, &args.account, period(&args.period)?)
        .map_err(AppError::from)?;
    write_json(args.period.ledger.output.as_deref(), &report)
}

fn period(args: &PeriodArgs) -> Result<ReportPeriod, AppError> {
    Ok(ReportPeriod::new(args.from, args.to)?)
}

/// Reads a document and rejects it with every violation if invalid.
fn load_document(path: &Path) -> anyhow::Result<FinancialDocument> {
    let document: FinancialDocument = read_json(path)?;
    let errors = validate_document(&document);
    if !errors.is_empty() {
        warn!(document = %document.number, violations = errors.len(), "document rejected");
        return Err(validation_failure(&errors).into());
    }
    Ok(document)
}

fn load_ledger(
    args: &LedgerArgs,
    config: &AppConfig,
) -> anyhow::Result<(ReportService, Vec<JournalEntry>)> {
    let entries: Vec<JournalEntry> = read_json(&args.entries)?;
    let chart = match &args.chart {
        Some(path) => read_json(path)?,
        None => ChartOfAccounts::new(),
    };
    info!(
        entries = entries.len(),
        accounts = chart.len(),
        tenant = %args.tenant,
        "ledger loaded"
    );
    let aggregator = LedgerAggregator::new(chart, args.tenant, config.ledger.balance_tolerance);
    Ok((ReportService::new(aggregator, args.currency.clone()), entries))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .map_err(AppError::from)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| AppError::Validation(vec![format!("{}: {e}", path.display())]))?;
    Ok(value)
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("failed to serialize output: {e}")))?;
    write_output(output, &json)
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{content}\n"))
            .map_err(AppError::from)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{content}").map_err(AppError::from)?;
        }
    }
    Ok(())
}
