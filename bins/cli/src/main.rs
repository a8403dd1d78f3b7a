//! Evenly CLI
//!
//! Splits expenses, computes balances and suggests settlements from JSON
//! input. Results go to stdout; logs go to stderr.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use evenly_core::ParticipantId;
use evenly_core::balance::ExpenseCategory;
use evenly_core::ledger::{ExpenseFilter, LedgerService};
use evenly_shared::{AppConfig, AppError, AppResult, LogConfig};

#[derive(Parser, Debug)]
#[command(name = "evenly")]
#[command(version, about = "Shared-expense ledger: split, balance and settle")]
struct Cli {
    /// Configuration file layered over `config/default` and `config/{RUN_MODE}`.
    #[arg(long, global = true, env = "EVENLY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split one expense and print the allocation.
    Split(InputArgs),
    /// Print per-participant balances for a ledger snapshot.
    Balances(InputArgs),
    /// Print suggested transfers that settle a ledger snapshot.
    Simplify(InputArgs),
    /// List the expenses of a ledger snapshot, newest first.
    Expenses(ExpensesArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON input file, or `-` for stdin.
    #[arg(long, short, default_value = "-")]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct ExpensesArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Only expenses this participant paid or shares.
    #[arg(long)]
    participant: Option<String>,

    /// Only expenses in this category.
    #[arg(long)]
    category: Option<ExpenseCategory>,

    /// Earliest expense date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest expense date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Smallest expense amount.
    #[arg(long)]
    min_amount: Option<Decimal>,

    /// Largest expense amount.
    #[arg(long)]
    max_amount: Option<Decimal>,
}

impl ExpensesArgs {
    fn filter(&self) -> ExpenseFilter {
        ExpenseFilter {
            participant: self.participant.clone().map(ParticipantId::new),
            category: self.category,
            start_date: self.from,
            end_date: self.to,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return fail(&AppError::from(err)),
    };

    init_tracing(&config.log);
    debug!(
        tolerance = %config.ledger.tolerance,
        max_participants = config.ledger.max_participants,
        "Configuration loaded"
    );

    match run(&cli.command, &LedgerService::new(&config.ledger)) {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => fail(&err),
    }
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(log.json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!log.json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn run(command: &Command, service: &LedgerService) -> AppResult<String> {
    match command {
        Command::Split(args) => {
            let raw = commands::read_input(&args.input)?;
            render(&commands::split(&raw)?)
        }
        Command::Balances(args) => {
            let raw = commands::read_input(&args.input)?;
            render(&commands::balances(service, &raw)?)
        }
        Command::Simplify(args) => {
            let raw = commands::read_input(&args.input)?;
            render(&commands::simplify(service, &raw)?)
        }
        Command::Expenses(args) => {
            let raw = commands::read_input(&args.input.input)?;
            render(&commands::expenses(service, &raw, &args.filter())?)
        }
    }
}

fn render<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(format!("Failed to serialize output: {e}")))
}

fn fail(err: &AppError) -> anyhow::Result<ExitCode> {
    tracing::error!(code = err.error_code(), "{err}");
    let body = json!({ "error": err.error_code(), "message": err.to_string() });
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(ExitCode::FAILURE)
}
