mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::lot_table::LotTableArgs;
use commands::record::RecordArgs;
use commands::sensitivity::SensitivityArgs;
use commands::simulate::{SimulateArgs, ValidateArgs};

/// Prop-firm hedge simulations
#[derive(Parser)]
#[command(
    name = "hedge-sim",
    version,
    about = "Prop-firm hedge simulations",
    long_about = "Computes recovery ratios, minimum deposits, pass/fail balances, \
                  projections and ROI for hedging a two-phase prop-firm evaluation \
                  and its funded stage from a real account."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log at debug level (overrides HEDGE_SIM_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full three-phase hedge simulation
    Simulate(SimulateArgs),
    /// Check simulation params and list every rejected field
    Validate(ValidateArgs),
    /// Mirror sample prop-firm lots onto the real account
    LotTable(LotTableArgs),
    /// Sweep one or two params and report a result field
    Sensitivity(SensitivityArgs),
    /// Build the flattened row stored for a saved simulation
    Record(RecordArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HEDGE_SIM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Validate(args) => commands::simulate::run_validate(args),
        Commands::LotTable(args) => commands::lot_table::run_lot_table(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Record(args) => commands::record::run_record(args),
        Commands::Version => {
            println!("hedge-sim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
