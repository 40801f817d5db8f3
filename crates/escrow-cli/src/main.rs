mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::escrow::{AnalyzeArgs, DepositArgs, ScheduleArgs};

/// RESPA escrow account analysis
#[derive(Parser)]
#[command(
    name = "esca",
    version,
    about = "Mortgage escrow account analysis with decimal precision",
    long_about = "A CLI for mortgage escrow account analysis with decimal precision. \
                  Builds 12-month disbursement calendars from recurring charges, solves \
                  for the minimum monthly deposit under the RESPA cushion cap, and \
                  projects month-end balances with surplus/shortage classification."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full 12-month escrow account analysis
    Analyze(AnalyzeArgs),
    /// Build the 12-month disbursement calendar only
    Schedule(ScheduleArgs),
    /// Solve the minimum monthly deposit for an explicit schedule
    Deposit(DepositArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::escrow::run_analyze(args),
        Commands::Schedule(args) => commands::escrow::run_schedule(args),
        Commands::Deposit(args) => commands::escrow::run_deposit(args),
        Commands::Version => {
            println!("esca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
