//! Abacus command line
//!
//! Reads a JSON request from a file or stdin, runs one engine computation,
//! and writes the JSON result to a file or stdout.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use abacus_cli::{Operation, run};
use abacus_core::payroll::{PayrollCalculator, PayrollSettings};
use abacus_shared::AppConfig;
use abacus_shared::config::LoggingConfig;

#[derive(Parser, Debug)]
#[command(name = "abacus", version, about = "Tax, journal, statement, and payroll calculations")]
struct Cli {
    /// Request file (stdin when omitted)
    #[arg(short = 'i', long = "input", global = true)]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Per-line tax breakdown of a sales document
    Tax,
    /// Check that a journal entry balances
    Journal {
        /// Fail unless the entry can be posted
        #[arg(long)]
        require_balanced: bool,
    },
    /// Running balances over ordered movements
    Statement,
    /// Compute one pay stub
    Payroll,
    /// Compute pay stubs for a batch of requests
    PayRun,
}

impl From<&Command> for Operation {
    fn from(command: &Command) -> Self {
        match command {
            Command::Tax => Self::Tax,
            Command::Journal { require_balanced } => Self::Journal {
                require_balanced: *require_balanced,
            },
            Command::Statement => Self::Statement,
            Command::Payroll => Self::Payroll,
            Command::PayRun => Self::PayRun,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let calculator = PayrollCalculator::new(PayrollSettings::from(&config.payroll));
    debug!(
        default_hours = %calculator.settings().default_hours,
        "Payroll settings loaded"
    );

    let input = read_input(cli.input.as_ref())?;
    let operation = Operation::from(&cli.command);
    let output = run(operation, &input, &calculator)
        .with_context(|| format!("{} failed", operation.name()))?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let fmt_layer = if logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    let mut input = String::new();
    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?
                .read_to_string(&mut input)?;
        }
        None => {
            io::stdin().read_to_string(&mut input)?;
        }
    }
    Ok(input)
}
