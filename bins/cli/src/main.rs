//! Racun command-line interface.
//!
//! Loads JSON records from disk, runs them through `racun-core`, and writes
//! XML or JSON output. Exit codes follow [`AppError::exit_code`].

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use racun_shared::{AppConfig, AppError};

use crate::cli::{Cli, LogFormat};

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .map_err(AppError::from)?;

    commands::run(cli.command, &config)
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "racun=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

/// Prints the failure to stderr and maps it onto an exit code.
fn report(err: &anyhow::Error) -> ExitCode {
    let Some(app) = err.downcast_ref::<AppError>() else {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    };
    match app {
        AppError::Validation(messages) => {
            eprintln!("error[{}]: validation failed", app.error_code());
            for message in messages {
                eprintln!("  {message}");
            }
        }
        _ => eprintln!("error[{}]: {err:#}", app.error_code()),
    }
    ExitCode::from(u8::try_from(app.exit_code()).unwrap_or(1))
}
